use std::collections::VecDeque;
use std::sync::Mutex;

use crate::form::form_data::FormData;
use crate::page::error::PageError;
use crate::transport::http::{HttpResponse, Transport};

/// What a scripted request resolves to.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(HttpResponse),
    /// Connection-level failure carrying this message
    NetworkError(String),
}

/// Transport answering from a queue, for running the page without a backend.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, FormData)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, response: HttpResponse) -> Self {
        self.push(Scripted::Reply(response));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Scripted::NetworkError(message.to_string()));
        self
    }

    pub fn push(&self, scripted: Scripted) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(scripted);
        }
    }

    /// Requests received so far, as (path, form data).
    pub fn requests(&self) -> Vec<(String, FormData)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Transport for ScriptedTransport {
    fn post_form(&self, path: &str, data: &FormData) -> Result<HttpResponse, PageError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((path.to_string(), data.clone()));
        }

        let next = self
            .replies
            .lock()
            .map_err(|e| PageError::Harness(format!("scripted transport lock poisoned: {}", e)))?
            .pop_front();

        match next {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::NetworkError(message)) => Err(PageError::Transport(Box::new(
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message),
            ))),
            None => Err(PageError::Harness("no scripted reply left".into())),
        }
    }
}
