use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::dom::document::{ARIA_CONTROLS, Document};
use crate::page::controller::{Settlement, SubmissionController, SubmitEvent, fetch};
use crate::page::error::PageError;
use crate::page::toggle::toggle_details;
use crate::page::ui_state::UiState;
use crate::trace::logger::TraceLogger;
use crate::transport::http::Transport;

/// Events the page reacts to.
#[derive(Debug)]
pub enum PageEvent {
    Submit(SubmitEvent),
    Click { target: String },
    Settled(Settlement),
}

/// Single-threaded dispatcher for one page.
///
/// Handlers run on the thread that owns the loop, so the document has a single
/// writer. Requests run on worker threads and come back as `Settled` events.
pub struct PageEventLoop<D: Document> {
    document: D,
    controller: SubmissionController,
    transport: Arc<dyn Transport>,
    tracer: TraceLogger,
    triggers: BTreeSet<String>,
    sender: Sender<PageEvent>,
    receiver: Receiver<PageEvent>,
    in_flight: usize,
}

impl<D: Document> PageEventLoop<D> {
    /// Attach listeners to a ready document.
    ///
    /// Fails if the form, spinner or results element is missing. Every element
    /// that already carries `aria-controls` is wired as a toggle trigger.
    pub fn attach(
        document: D,
        controller: SubmissionController,
        transport: Arc<dyn Transport>,
        tracer: TraceLogger,
    ) -> Result<Self, PageError> {
        let ids = controller.ids();
        for (id, role) in [
            (&ids.form_id, "submission form"),
            (&ids.spinner_id, "loading spinner"),
            (&ids.results_id, "results area"),
        ] {
            if !document.contains(id) {
                return Err(PageError::not_found(id, role));
            }
        }
        document.form_fields(&ids.form_id)?;

        let triggers = document
            .ids_with_attribute(ARIA_CONTROLS)
            .into_iter()
            .collect();
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            document,
            controller,
            transport,
            tracer,
            triggers,
            sender,
            receiver,
            in_flight: 0,
        })
    }

    /// Wire one more element as a toggle trigger.
    pub fn listen_toggle(&mut self, trigger_id: &str) -> Result<(), PageError> {
        if !self.document.contains(trigger_id) {
            return Err(PageError::not_found(trigger_id, "toggle trigger"));
        }
        self.triggers.insert(trigger_id.to_string());
        Ok(())
    }

    pub fn is_trigger(&self, id: &str) -> bool {
        self.triggers.contains(id)
    }

    /// Handle for queueing events from outside the loop.
    pub fn sender(&self) -> Sender<PageEvent> {
        self.sender.clone()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn state(&self) -> &UiState {
        self.controller.state()
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Result<(), PageError> {
        match event {
            PageEvent::Submit(mut submit) => {
                if submit.form_id != self.controller.ids().form_id {
                    log::debug!("no submit listener on '#{}'", submit.form_id);
                    return Ok(());
                }

                let submission =
                    self.controller
                        .on_submit(&mut submit, &mut self.document, &self.tracer)?;

                let transport = Arc::clone(&self.transport);
                let sender = self.sender.clone();
                let path = self.controller.process_path().to_string();
                self.in_flight += 1;

                thread::spawn(move || {
                    let generation = submission.generation;
                    let settlement = panic::catch_unwind(AssertUnwindSafe(|| {
                        fetch(transport.as_ref(), &path, submission)
                    }))
                    .unwrap_or_else(|payload| {
                        let msg = panic_message(payload.as_ref());
                        log::error!("transport panicked for generation {}: {}", generation, msg);
                        Settlement {
                            generation,
                            outcome: Err(PageError::Transport(Box::from(format!(
                                "transport panicked: {}",
                                msg
                            )))),
                        }
                    });
                    // receiver gone: the page was torn down
                    let _ = sender.send(PageEvent::Settled(settlement));
                });
                Ok(())
            }

            PageEvent::Click { target } => {
                if !self.triggers.contains(&target) {
                    return Ok(());
                }
                toggle_details(&mut self.document, &target, &self.tracer)?;
                Ok(())
            }

            PageEvent::Settled(settlement) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.controller
                    .on_settled(settlement, &mut self.document, &self.tracer)?;
                Ok(())
            }
        }
    }

    pub fn submit(&mut self) -> Result<(), PageError> {
        let form_id = self.controller.ids().form_id.clone();
        self.dispatch(PageEvent::Submit(SubmitEvent::new(&form_id)))
    }

    pub fn click(&mut self, target: &str) -> Result<(), PageError> {
        self.dispatch(PageEvent::Click {
            target: target.to_string(),
        })
    }

    /// Handle the next queued event, blocking until one arrives.
    pub fn step(&mut self) -> Result<(), PageError> {
        let event = self
            .receiver
            .recv()
            .map_err(|e| PageError::Harness(format!("event channel closed: {}", e)))?;
        self.dispatch(event)
    }

    /// Process events until no request is outstanding.
    ///
    /// There is no timeout: a request that never settles blocks here.
    pub fn run_until_idle(&mut self) -> Result<(), PageError> {
        loop {
            if self.in_flight > 0 {
                self.step()?;
                continue;
            }
            match self.receiver.try_recv() {
                Ok(event) => self.dispatch(event)?,
                Err(_) => return Ok(()),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
