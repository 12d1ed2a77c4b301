use crate::dom::markup::TrustedMarkup;
use crate::form::form_model::FormField;
use crate::page::error::PageError;

pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_CONTROLS: &str = "aria-controls";

/// Inline `style.display` values the page writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// A single change to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetDisplay { id: String, display: Display },
    ClearHtml { id: String },
    SetHtml { id: String, html: TrustedMarkup },
    SetAttribute { id: String, name: String, value: String },
}

impl Mutation {
    pub fn target(&self) -> &str {
        match self {
            Mutation::SetDisplay { id, .. }
            | Mutation::ClearHtml { id }
            | Mutation::SetHtml { id, .. }
            | Mutation::SetAttribute { id, .. } => id,
        }
    }
}

/// The slice of the DOM the page scripts touch. Elements are addressed by id.
pub trait Document {
    fn contains(&self, id: &str) -> bool;

    /// Inline display, `None` when the element has no explicit value.
    fn display(&self, id: &str) -> Result<Option<Display>, PageError>;

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), PageError>;

    fn inner_html(&self, id: &str) -> Result<String, PageError>;

    fn clear_inner_html(&mut self, id: &str) -> Result<(), PageError>;

    fn set_inner_html(&mut self, id: &str, html: &TrustedMarkup) -> Result<(), PageError>;

    fn attribute(&self, id: &str, name: &str) -> Result<Option<String>, PageError>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), PageError>;

    /// Controls of a form, in document order.
    fn form_fields(&self, form_id: &str) -> Result<Vec<FormField>, PageError>;

    /// Ids of every element carrying `name`, in document order.
    fn ids_with_attribute(&self, name: &str) -> Vec<String>;
}

pub fn apply(doc: &mut dyn Document, mutation: &Mutation) -> Result<(), PageError> {
    match mutation {
        Mutation::SetDisplay { id, display } => doc.set_display(id, *display),
        Mutation::ClearHtml { id } => doc.clear_inner_html(id),
        Mutation::SetHtml { id, html } => doc.set_inner_html(id, html),
        Mutation::SetAttribute { id, name, value } => doc.set_attribute(id, name, value),
    }
}

pub fn apply_all(doc: &mut dyn Document, mutations: &[Mutation]) -> Result<(), PageError> {
    for mutation in mutations {
        apply(doc, mutation)?;
    }
    Ok(())
}
