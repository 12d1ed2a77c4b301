use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};

use crate::form::form_model::{FieldKind, FileUpload, FormField};
use crate::page::error::PageError;

/// The serialized contents of a form, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEntry {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

impl FormEntry {
    pub fn name(&self) -> &str {
        match self {
            FormEntry::Text { name, .. } | FormEntry::File { name, .. } => name,
        }
    }
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the fields a browser would submit for this form.
    ///
    /// Unnamed, disabled and button controls are skipped, unchecked boxes are
    /// skipped, a multi-select yields one entry per selected option, and an empty
    /// file input still yields one (empty) file entry.
    pub fn capture(fields: &[FormField]) -> Self {
        let mut data = FormData::new();

        for field in fields {
            if field.name.is_empty() || field.disabled {
                continue;
            }

            match &field.kind {
                FieldKind::Text(value) => data.append_text(&field.name, value),
                FieldKind::Checkable { checked: true, value } => {
                    data.append_text(&field.name, value.as_deref().unwrap_or("on"))
                }
                FieldKind::Checkable { checked: false, .. } => {}
                FieldKind::Select(selected) => {
                    for value in selected {
                        data.append_text(&field.name, value);
                    }
                }
                FieldKind::File(files) if files.is_empty() => {
                    data.append_file(&field.name, FileUpload::empty())
                }
                FieldKind::File(files) => {
                    for file in files {
                        data.append_file(&field.name, file.clone());
                    }
                }
                FieldKind::Button => {}
            }
        }

        data
    }

    pub fn append_text(&mut self, name: &str, value: &str) {
        self.entries.push(FormEntry::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn append_file(&mut self, name: &str, file: FileUpload) {
        self.entries.push(FormEntry::File {
            name: name.to_string(),
            file,
        });
    }

    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First text value under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            FormEntry::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                FormEntry::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Build the multipart body; reqwest picks the boundary and content type.
    pub fn to_multipart(&self) -> Result<Form, PageError> {
        let mut form = Form::new();

        for entry in &self.entries {
            form = match entry {
                FormEntry::Text { name, value } => form.text(name.clone(), value.clone()),
                FormEntry::File { name, file } => {
                    let mut part =
                        Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                    if let Some(content_type) = &file.content_type {
                        part = part.mime_str(content_type)?;
                    }
                    form.part(name.clone(), part)
                }
            };
        }

        Ok(form)
    }
}

/// Split a `name=value` command-line argument.
pub fn parse_field_arg(arg: &str) -> Result<(String, String), PageError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(PageError::InvalidField(arg.to_string())),
    }
}

/// Load a file from disk as an upload for a file input.
pub fn load_upload(path: &str) -> Result<FileUpload, PageError> {
    let bytes = std::fs::read(path).map_err(|e| PageError::FileRead {
        path: path.to_string(),
        source: e,
    })?;

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content_type = mime_guess::from_path(path).first_or_octet_stream();

    Ok(FileUpload::new(&file_name, Some(content_type.essence_str()), bytes))
}
