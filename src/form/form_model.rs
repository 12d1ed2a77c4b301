/// One control inside a form, as the page holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub disabled: bool,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// text, textarea, hidden, email, number ...
    Text(String),
    /// checkbox or radio; `value` defaults to "on" when the page sets none
    Checkable { checked: bool, value: Option<String> },
    /// select (single or multiple): the currently selected option values
    Select(Vec<String>),
    /// file input with the files the user picked
    File(Vec<FileUpload>),
    /// submit/reset/button: never part of the submitted data
    Button,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormField {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            disabled: false,
            kind: FieldKind::Text(value.to_string()),
        }
    }

    pub fn checkbox(name: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            disabled: false,
            kind: FieldKind::Checkable { checked, value: None },
        }
    }

    pub fn select(name: &str, selected: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            disabled: false,
            kind: FieldKind::Select(selected.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn file(name: &str, files: Vec<FileUpload>) -> Self {
        Self {
            name: name.to_string(),
            disabled: false,
            kind: FieldKind::File(files),
        }
    }

    pub fn button(name: &str) -> Self {
        Self {
            name: name.to_string(),
            disabled: false,
            kind: FieldKind::Button,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl FileUpload {
    pub fn new(file_name: &str, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    /// What a browser sends for a file input left empty.
    pub fn empty() -> Self {
        Self {
            file_name: String::new(),
            content_type: Some("application/octet-stream".into()),
            bytes: Vec::new(),
        }
    }
}
