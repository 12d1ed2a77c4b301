use std::fmt;

#[derive(Debug)]
pub enum PageError {
    /// No element with this id exists in the document
    ElementNotFound { id: String, context: String },

    /// The submit target is not a form element
    NotAForm(String),

    /// Toggle trigger carries no usable aria-controls pairing
    MissingPairing { trigger: String },

    /// Request never produced a response (connect, reset, body read)
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// Backend answered with a status other than 200
    HttpStatus { status: u16, body: String },

    /// Body was not JSON, or was JSON but not a string
    ResponseShape { source: serde_json::Error },

    /// File attached to a file input could not be read
    FileRead { path: String, source: std::io::Error },

    /// `name=value` argument could not be split
    InvalidField(String),

    /// Config file exists but is not valid YAML for the config model
    Config { path: String, source: serde_yaml::Error },

    /// Mock transport ran out of scripted responses, or a similar harness fault
    Harness(String),
}

impl PageError {
    pub fn not_found(id: &str, context: &str) -> Self {
        PageError::ElementNotFound {
            id: id.to_string(),
            context: context.to_string(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::ElementNotFound { id, context } => {
                write!(f, "Element '#{}' not found: {}", id, context)
            }
            PageError::NotAForm(id) => write!(f, "Element '#{}' is not a form", id),
            PageError::MissingPairing { trigger } => {
                write!(f, "Trigger '#{}' has no aria-controls panel", trigger)
            }
            PageError::Transport(e) => write!(f, "Request failed: {}", e),
            PageError::HttpStatus { status, body } => {
                write!(f, "Backend returned HTTP {}: {}", status, body)
            }
            PageError::ResponseShape { source } => {
                write!(f, "Response is not a JSON string: {}", source)
            }
            PageError::FileRead { path, source } => {
                write!(f, "Failed to read file '{}': {}", path, source)
            }
            PageError::InvalidField(arg) => {
                write!(f, "Expected name=value, got '{}'", arg)
            }
            PageError::Config { path, source } => {
                write!(f, "malformed config '{}': {}", path, source)
            }
            PageError::Harness(msg) => write!(f, "Harness error: {}", msg),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Transport(source) => Some(source.as_ref()),
            PageError::ResponseShape { source } => Some(source),
            PageError::FileRead { source, .. } => Some(source),
            PageError::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PageError {
    fn from(e: reqwest::Error) -> Self {
        PageError::Transport(Box::new(e))
    }
}
