use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::page::error::PageError;
use crate::page::ui_state::{DEFAULT_ERROR_MESSAGE, PageIds};
use crate::transport::http::{DEFAULT_BASE_URL, PROCESS_PATH};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "ingredient-check",
    version,
    about = "Drive the ingredient analysis page: submit the form, toggle details"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend base URL (the form posts to <base-url>/process)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Append lifecycle events as JSON lines to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: ingredient-check.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit the ingredient form and print the rendered results
    Submit {
        /// Text field as name=value (repeatable)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// File field as name=path (repeatable)
        #[arg(long = "file", value_name = "NAME=PATH")]
        files: Vec<String>,
    },

    /// Click a sample details trigger and print the panel state after each click
    Toggle {
        /// Number of clicks
        #[arg(long, default_value_t = 1)]
        clicks: usize,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `ingredient-check.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_process_path")]
    pub process_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            process_path: default_process_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// `form_id`, `spinner_id` and `results_id` sit directly under `page:`
    #[serde(flatten)]
    pub ids: PageIds,

    #[serde(default = "default_error_message")]
    pub error_message: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            ids: PageIds::default(),
            error_message: default_error_message(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_process_path() -> String { PROCESS_PATH.to_string() }
fn default_error_message() -> String { DEFAULT_ERROR_MESSAGE.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Parse YAML config text; `path` only labels the error.
pub fn parse_config(content: &str, path: &str) -> Result<AppConfig, PageError> {
    serde_yaml::from_str(content).map_err(|e| PageError::Config {
        path: path.to_string(),
        source: e,
    })
}

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("ingredient-check.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content, config_path).unwrap_or_else(|e| {
            log::warn!("ignoring {}", e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings resolution (CLI > config file > defaults)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub process_path: String,
    pub ids: PageIds,
    pub error_message: String,
    pub trace_path: Option<String>,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    Settings {
        base_url: cli
            .base_url
            .clone()
            .unwrap_or_else(|| config.backend.base_url.clone()),
        process_path: config.backend.process_path.clone(),
        ids: config.page.ids.clone(),
        error_message: config.page.error_message.clone(),
        trace_path: cli.trace.clone().or_else(|| config.trace.path.clone()),
    }
}
