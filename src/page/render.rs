use crate::dom::document::{Display, Document, Mutation, apply_all};
use crate::dom::markup::TrustedMarkup;
use crate::page::error::PageError;
use crate::page::ui_state::{ERROR_CLASS, PageIds, UiState};

/// Mutations that bring the page into `state`.
///
/// Pure: the same state always yields the same list. `Idle` leaves the page as
/// served, so it yields nothing.
pub fn plan(state: &UiState, ids: &PageIds) -> Vec<Mutation> {
    match state {
        UiState::Idle => vec![],
        UiState::Loading => vec![
            Mutation::SetDisplay {
                id: ids.spinner_id.clone(),
                display: Display::Block,
            },
            Mutation::ClearHtml {
                id: ids.results_id.clone(),
            },
        ],
        UiState::Success(markup) => vec![
            Mutation::SetDisplay {
                id: ids.spinner_id.clone(),
                display: Display::None,
            },
            Mutation::SetHtml {
                id: ids.results_id.clone(),
                html: markup.clone(),
            },
        ],
        UiState::Failure(message) => vec![
            Mutation::SetDisplay {
                id: ids.spinner_id.clone(),
                display: Display::None,
            },
            Mutation::SetHtml {
                id: ids.results_id.clone(),
                html: error_markup(message),
            },
        ],
    }
}

pub fn render(state: &UiState, ids: &PageIds, doc: &mut dyn Document) -> Result<(), PageError> {
    apply_all(doc, &plan(state, ids))
}

pub fn error_markup(message: &str) -> TrustedMarkup {
    TrustedMarkup::paragraph(ERROR_CLASS, message)
}
