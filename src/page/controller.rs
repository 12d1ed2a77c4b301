use crate::dom::document::Document;
use crate::dom::markup::TrustedMarkup;
use crate::form::form_data::FormData;
use crate::page::error::PageError;
use crate::page::render::render;
use crate::page::ui_state::{DEFAULT_ERROR_MESSAGE, PageIds, UiState};
use crate::trace::{logger::TraceLogger, trace::TraceEvent};
use crate::transport::http::{PROCESS_PATH, Transport, decode_markup};

/// A submit event as delivered to the form's listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    pub form_id: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: &str) -> Self {
        Self {
            form_id: form_id.to_string(),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A request that has left the page and not yet come back.
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub data: FormData,
}

/// The outcome of one submission, tagged with the generation it belongs to.
#[derive(Debug)]
pub struct Settlement {
    pub generation: u64,
    pub outcome: Result<TrustedMarkup, PageError>,
}

/// Drives the spinner and results area through one submission at a time.
///
/// Every submit bumps the generation. A settlement for an older generation is
/// dropped without touching the page, so a newer submission always supersedes a
/// pending one.
pub struct SubmissionController {
    ids: PageIds,
    process_path: String,
    error_message: String,
    state: UiState,
    generation: u64,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(PageIds::default(), PROCESS_PATH, DEFAULT_ERROR_MESSAGE)
    }
}

impl SubmissionController {
    pub fn new(ids: PageIds, process_path: &str, error_message: &str) -> Self {
        Self {
            ids,
            process_path: process_path.to_string(),
            error_message: error_message.to_string(),
            state: UiState::Idle,
            generation: 0,
        }
    }

    pub fn ids(&self) -> &PageIds {
        &self.ids
    }

    pub fn process_path(&self) -> &str {
        &self.process_path
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Intercept the submit, enter loading and capture the form.
    ///
    /// The default action is prevented before anything else, even when the
    /// form cannot be read.
    pub fn on_submit(
        &mut self,
        event: &mut SubmitEvent,
        doc: &mut dyn Document,
        tracer: &TraceLogger,
    ) -> Result<Submission, PageError> {
        event.prevent_default();

        let fields = doc.form_fields(&event.form_id)?;
        let data = FormData::capture(&fields);

        if self.state.is_loading() {
            log::debug!(
                "submission {} superseded before settling",
                self.generation
            );
        }

        self.generation += 1;
        self.transition(UiState::Loading, doc)?;

        tracer.log(
            &TraceEvent::now("submit")
                .with_generation(self.generation)
                .with_state(&self.state)
                .with_fields(data.len())
                .with_target(&event.form_id),
        );

        Ok(Submission {
            generation: self.generation,
            data,
        })
    }

    /// Render a settled request. Returns `false` when the settlement belongs to
    /// a superseded submission and was discarded.
    pub fn on_settled(
        &mut self,
        settlement: Settlement,
        doc: &mut dyn Document,
        tracer: &TraceLogger,
    ) -> Result<bool, PageError> {
        if settlement.generation != self.generation || !self.state.is_loading() {
            log::debug!(
                "discarding stale settlement {} (current {})",
                settlement.generation,
                self.generation
            );
            tracer.log(
                &TraceEvent::now("stale")
                    .with_generation(settlement.generation)
                    .with_state(&self.state),
            );
            return Ok(false);
        }

        let mut event = TraceEvent::now("settled").with_generation(settlement.generation);

        let next = match settlement.outcome {
            Ok(markup) => UiState::Success(markup),
            Err(e) => {
                log::error!("Error: {}", e);
                event = event.with_detail(&e);
                UiState::Failure(self.error_message.clone())
            }
        };

        self.transition(next, doc)?;
        tracer.log(&event.with_state(&self.state));
        Ok(true)
    }

    /// Submit and wait for the reply on the calling thread.
    pub fn submit(
        &mut self,
        event: &mut SubmitEvent,
        doc: &mut dyn Document,
        transport: &dyn Transport,
        tracer: &TraceLogger,
    ) -> Result<&UiState, PageError> {
        let submission = self.on_submit(event, doc, tracer)?;
        let settlement = fetch(transport, &self.process_path, submission);
        self.on_settled(settlement, doc, tracer)?;
        Ok(&self.state)
    }

    fn transition(&mut self, next: UiState, doc: &mut dyn Document) -> Result<(), PageError> {
        render(&next, &self.ids, doc)?;
        self.state = next;
        Ok(())
    }
}

/// Send a submission and decode the reply. Runs off the page thread.
pub fn fetch(transport: &dyn Transport, path: &str, submission: Submission) -> Settlement {
    let outcome = transport
        .post_form(path, &submission.data)
        .and_then(decode_markup);

    Settlement {
        generation: submission.generation,
        outcome,
    }
}
