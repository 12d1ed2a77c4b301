use std::sync::Arc;

use crate::cli::config::Settings;
use crate::dom::document::{ARIA_EXPANDED, Display, Document};
use crate::dom::memory::MemoryDocument;
use crate::form::form_data::{load_upload, parse_field_arg};
use crate::form::form_model::{FileUpload, FormField};
use crate::page::controller::SubmissionController;
use crate::page::error::PageError;
use crate::page::event_loop::PageEventLoop;
use crate::page::ui_state::UiState;
use crate::trace::logger::TraceLogger;
use crate::transport::http::{HttpTransport, Transport};

pub const SAMPLE_TRIGGER_ID: &str = "ingredient-0";
pub const SAMPLE_PANEL_ID: &str = "ingredient-0-details";

// ============================================================================
// submit subcommand
// ============================================================================

/// Submit the form against the configured backend. Returns whether the
/// submission succeeded.
pub fn cmd_submit(
    settings: &Settings,
    fields: &[String],
    files: &[String],
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let form_fields = build_fields(fields, files)?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&settings.base_url)?);
    let tracer = TraceLogger::from_path(settings.trace_path.as_deref());

    if verbose > 0 {
        eprintln!(
            "Submitting {} fields to {}{}...",
            form_fields.len(),
            settings.base_url,
            settings.process_path
        );
    }

    let (state, results) = run_submission(settings, form_fields, transport, tracer)?;
    println!("{}", results);

    Ok(matches!(state, UiState::Success(_)))
}

/// Build the page in memory, submit it once and wait for the outcome.
/// Returns the final state and the results area content.
pub fn run_submission(
    settings: &Settings,
    fields: Vec<FormField>,
    transport: Arc<dyn Transport>,
    tracer: TraceLogger,
) -> Result<(UiState, String), PageError> {
    let document = MemoryDocument::ingredient_page(&settings.ids, fields);
    let controller = SubmissionController::new(
        settings.ids.clone(),
        &settings.process_path,
        &settings.error_message,
    );

    let mut page = PageEventLoop::attach(document, controller, transport, tracer)?;
    page.submit()?;
    page.run_until_idle()?;

    let results = page.document().inner_html(&settings.ids.results_id)?;
    Ok((page.state().clone(), results))
}

/// Turn `name=value` and `name=path` arguments into form controls, keeping
/// text fields first and grouping files under their input name.
pub fn build_fields(fields: &[String], files: &[String]) -> Result<Vec<FormField>, PageError> {
    let mut out = Vec::new();

    for arg in fields {
        let (name, value) = parse_field_arg(arg)?;
        out.push(FormField::text(&name, &value));
    }

    let mut grouped: Vec<(String, Vec<FileUpload>)> = Vec::new();
    for arg in files {
        let (name, path) = parse_field_arg(arg)?;
        let upload = load_upload(&path)?;
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, uploads)) => uploads.push(upload),
            None => grouped.push((name, vec![upload])),
        }
    }
    for (name, uploads) in grouped {
        out.push(FormField::file(&name, uploads));
    }

    Ok(out)
}

// ============================================================================
// toggle subcommand
// ============================================================================

pub fn cmd_toggle(settings: &Settings, clicks: usize) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = TraceLogger::from_path(settings.trace_path.as_deref());
    for line in run_toggle(settings, clicks, tracer)? {
        println!("{}", line);
    }
    Ok(())
}

/// Click the sample trigger `clicks` times; one report line per click.
pub fn run_toggle(
    settings: &Settings,
    clicks: usize,
    tracer: TraceLogger,
) -> Result<Vec<String>, PageError> {
    let document = MemoryDocument::ingredient_page(&settings.ids, vec![]).with_details(
        SAMPLE_TRIGGER_ID,
        SAMPLE_PANEL_ID,
        "This ingredient is considered non-harmful and safe for most people.",
    );
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&settings.base_url)?);
    let mut page = PageEventLoop::attach(
        document,
        SubmissionController::new(
            settings.ids.clone(),
            &settings.process_path,
            &settings.error_message,
        ),
        transport,
        tracer,
    )?;

    let mut lines = Vec::with_capacity(clicks);
    for click in 1..=clicks {
        page.click(SAMPLE_TRIGGER_ID)?;

        let doc = page.document();
        let display = doc
            .display(SAMPLE_PANEL_ID)?
            .unwrap_or(Display::None)
            .as_css();
        let expanded = doc
            .attribute(SAMPLE_TRIGGER_ID, ARIA_EXPANDED)?
            .unwrap_or_default();
        lines.push(format!(
            "click {}: display={} aria-expanded={}",
            click, display, expanded
        ));
    }

    Ok(lines)
}
