use std::time::Duration;

use reqwest::blocking::Client;

use crate::dom::markup::TrustedMarkup;
use crate::form::form_data::FormData;
use crate::page::error::PageError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const PROCESS_PATH: &str = "/process";

/// Status and body of a backend reply, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// 200 with `markup` encoded as a JSON string.
    pub fn markup(markup: &str) -> Self {
        Self {
            status: 200,
            body: serde_json::Value::String(markup.to_string()).to_string(),
        }
    }
}

/// Sends a form to the backend.
///
/// Implementations must be shareable with the worker thread that runs the
/// request while the page keeps handling events.
pub trait Transport: Send + Sync {
    fn post_form(&self, path: &str, data: &FormData) -> Result<HttpResponse, PageError>;
}

/// `reqwest` transport posting multipart bodies to `base_url`.
pub struct HttpTransport {
    pub base_url: String,
    client: Client,
}

impl HttpTransport {
    /// No request timeout: a backend that never answers keeps the submission
    /// loading until the process goes away.
    pub fn new(base_url: &str) -> Result<Self, PageError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, path: &str, data: &FormData) -> Result<HttpResponse, PageError> {
        let url = self.url_for(path);
        log::debug!("POST {} ({} fields)", url, data.len());

        let response = self
            .client
            .post(&url)
            .multipart(data.to_multipart()?)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Interpret a reply under the `/process` contract: HTTP 200 and a JSON string
/// holding the markup to inject.
pub fn decode_markup(response: HttpResponse) -> Result<TrustedMarkup, PageError> {
    if response.status != 200 {
        return Err(PageError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }

    let html: String = serde_json::from_str(&response.body)
        .map_err(|e| PageError::ResponseShape { source: e })?;

    Ok(TrustedMarkup::from_backend(html))
}
