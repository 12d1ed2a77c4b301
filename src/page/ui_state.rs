use serde::{Deserialize, Serialize};

use crate::dom::markup::TrustedMarkup;

pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred. Please try again.";
pub const ERROR_CLASS: &str = "text-danger";

/// Element ids the submission flow renders into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIds {
    #[serde(default = "default_form_id")]
    pub form_id: String,

    #[serde(default = "default_spinner_id")]
    pub spinner_id: String,

    #[serde(default = "default_results_id")]
    pub results_id: String,
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            spinner_id: default_spinner_id(),
            results_id: default_results_id(),
        }
    }
}

fn default_form_id() -> String { "ingredient-form".to_string() }
fn default_spinner_id() -> String { "loading-spinner".to_string() }
fn default_results_id() -> String { "results".to_string() }

/// What the submission area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    /// Nothing submitted yet; the page is left as served
    Idle,
    /// Spinner shown, results cleared
    Loading,
    /// Spinner hidden, backend markup in the results area
    Success(TrustedMarkup),
    /// Spinner hidden, user-facing error message in the results area
    Failure(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success(_) => "success",
            UiState::Failure(_) => "failure",
        }
    }
}
