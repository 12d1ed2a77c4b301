use clap::Parser;
use ingredient_check::cli::commands::{cmd_submit, cmd_toggle};
use ingredient_check::cli::config::{Cli, Commands, load_config, resolve_settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(cli.config.as_deref());
    let settings = resolve_settings(&cli, &config);

    match cli.command {
        Commands::Submit { fields, files } => {
            let succeeded = cmd_submit(&settings, &fields, &files, cli.verbose)?;
            if !succeeded {
                std::process::exit(1);
            }
        }
        Commands::Toggle { clicks } => {
            cmd_toggle(&settings, clicks)?;
        }
    }

    Ok(())
}
