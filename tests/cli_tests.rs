use std::sync::Arc;

use clap::Parser;
use ingredient_check::{
    cli::{
        commands::{build_fields, run_submission, run_toggle},
        config::{AppConfig, Cli, Commands, load_config, parse_config, resolve_settings},
    },
    form::form_model::FieldKind,
    page::{error::PageError, ui_state::UiState},
    trace::logger::TraceLogger,
    transport::{http::HttpResponse, mock::ScriptedTransport},
};

use crate::common::utils::ERROR_PARAGRAPH;

mod common;

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("ingredient-cli-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_submit_fields_and_files() {
    let cli = Cli::parse_from([
        "ingredient-check",
        "submit",
        "--field",
        "ingredients=tomato",
        "--field",
        "notes=none",
        "--file",
        "photo=label.png",
    ]);
    match cli.command {
        Commands::Submit { fields, files } => {
            assert_eq!(fields, vec!["ingredients=tomato", "notes=none"]);
            assert_eq!(files, vec!["photo=label.png"]);
        }
        _ => panic!("Expected Submit command"),
    }
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.base_url, None);
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "ingredient-check",
        "toggle",
        "--clicks",
        "3",
        "-vv",
        "--base-url",
        "http://backend:8000",
        "--trace",
        "trace.jsonl",
    ]);
    match cli.command {
        Commands::Toggle { clicks } => assert_eq!(clicks, 3),
        _ => panic!("Expected Toggle command"),
    }
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.base_url.as_deref(), Some("http://backend:8000"));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));
}

#[test]
fn cli_toggle_defaults_to_one_click() {
    let cli = Cli::parse_from(["ingredient-check", "toggle"]);
    assert!(matches!(cli.command, Commands::Toggle { clicks: 1 }));
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["ingredient-check"]).is_err());
}

// ============================================================================
// Config file
// ============================================================================

#[test]
fn missing_config_yields_defaults() {
    let config = load_config(Some("/definitely/not/here.yaml"));
    assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.backend.process_path, "/process");
    assert_eq!(config.page.ids.form_id, "ingredient-form");
    assert_eq!(config.page.ids.spinner_id, "loading-spinner");
    assert_eq!(config.page.ids.results_id, "results");
    assert_eq!(config.page.error_message, "An error occurred. Please try again.");
    assert_eq!(config.trace.path, None);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let path = temp_dir("partial").join("ingredient-check.yaml");
    std::fs::write(
        &path,
        "backend:\n  base_url: http://analyzer:9000\npage:\n  results_id: output\n  error_message: Try again later.\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.backend.base_url, "http://analyzer:9000");
    assert_eq!(config.backend.process_path, "/process");
    assert_eq!(config.page.ids.results_id, "output");
    assert_eq!(config.page.ids.form_id, "ingredient-form");
    assert_eq!(config.page.ids.spinner_id, "loading-spinner");
    assert_eq!(config.page.error_message, "Try again later.");
}

#[test]
fn page_ids_are_read_from_flat_page_keys() {
    let config = parse_config(
        "page:\n  results_id: output\n  form_id: my-form\n  spinner_id: busy\n",
        "inline.yaml",
    )
    .unwrap();
    assert_eq!(config.page.ids.form_id, "my-form");
    assert_eq!(config.page.ids.spinner_id, "busy");
    assert_eq!(config.page.ids.results_id, "output");
    assert_eq!(config.page.error_message, "An error occurred. Please try again.");
}

#[test]
fn malformed_config_yields_defaults() {
    let path = temp_dir("malformed").join("ingredient-check.yaml");
    std::fs::write(&path, "backend: [not, a, map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
}

#[test]
fn malformed_config_reports_config_error() {
    match parse_config("backend: [not, a, map", "broken.yaml") {
        Err(PageError::Config { path, .. }) => assert_eq!(path, "broken.yaml"),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn cli_overrides_config() {
    let mut config = AppConfig::default();
    config.backend.base_url = "http://from-config".into();
    config.trace.path = Some("config.jsonl".into());

    let cli = Cli::parse_from(["ingredient-check", "--base-url", "http://from-cli", "toggle"]);
    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.base_url, "http://from-cli");
    assert_eq!(settings.trace_path.as_deref(), Some("config.jsonl"));

    let cli = Cli::parse_from(["ingredient-check", "toggle"]);
    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.base_url, "http://from-config");
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn build_fields_groups_files_by_name() {
    let dir = temp_dir("files");
    let a = dir.join("a.txt");
    let b = dir.join("b.png");
    std::fs::write(&a, "salt").unwrap();
    std::fs::write(&b, [0x89u8, b'P']).unwrap();

    let fields = build_fields(
        &["ingredients=salt".to_string()],
        &[
            format!("photos={}", a.display()),
            format!("photos={}", b.display()),
        ],
    )
    .unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "ingredients");
    match &fields[1].kind {
        FieldKind::File(uploads) => {
            let names: Vec<&str> = uploads.iter().map(|u| u.file_name.as_str()).collect();
            assert_eq!(names, vec!["a.txt", "b.png"]);
        }
        other => panic!("Expected file field, got {:?}", other),
    }
}

#[test]
fn build_fields_rejects_bad_argument() {
    let result = build_fields(&["ingredients".to_string()], &[]);
    assert!(matches!(result, Err(PageError::InvalidField(_))));
}

#[test]
fn run_submission_returns_state_and_results() {
    let settings = resolve_settings(
        &Cli::parse_from(["ingredient-check", "toggle"]),
        &AppConfig::default(),
    );

    let transport = Arc::new(ScriptedTransport::new().reply(HttpResponse::markup("<p>3 matches</p>")));
    let fields = build_fields(&["ingredients=tomato".to_string()], &[]).unwrap();
    let (state, results) =
        run_submission(&settings, fields, transport.clone(), TraceLogger::disabled()).unwrap();

    assert!(matches!(state, UiState::Success(_)));
    assert_eq!(results, "<p>3 matches</p>");
    assert_eq!(transport.requests()[0].0, "/process");

    let failing = Arc::new(ScriptedTransport::new().fail("refused"));
    let (state, results) =
        run_submission(&settings, vec![], failing, TraceLogger::disabled()).unwrap();
    assert!(matches!(state, UiState::Failure(_)));
    assert_eq!(results, ERROR_PARAGRAPH);
}

#[test]
fn run_toggle_reports_each_click() {
    let settings = resolve_settings(
        &Cli::parse_from(["ingredient-check", "toggle"]),
        &AppConfig::default(),
    );

    let lines = run_toggle(&settings, 3, TraceLogger::disabled()).unwrap();
    assert_eq!(
        lines,
        vec![
            "click 1: display=block aria-expanded=true",
            "click 2: display=none aria-expanded=false",
            "click 3: display=block aria-expanded=true",
        ]
    );
}
