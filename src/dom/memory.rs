use std::collections::BTreeMap;

use crate::dom::document::{ARIA_CONTROLS, ARIA_EXPANDED, Display, Document, Mutation};
use crate::dom::markup::TrustedMarkup;
use crate::form::form_model::FormField;
use crate::page::error::PageError;
use crate::page::ui_state::PageIds;

#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    pub tag: String,
    pub display: Option<Display>,
    pub inner_html: String,
    pub attributes: BTreeMap<String, String>,
    /// Only populated for `<form>` elements
    pub fields: Vec<FormField>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.inner_html = html.to_string();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A DOM held in memory. Every write is also appended to a mutation log so
/// callers can check what was changed, and in which order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    order: Vec<String>,
    elements: BTreeMap<String, MemoryElement>,
    log: Vec<Mutation>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: &str, element: MemoryElement) -> Self {
        self.insert(id, element);
        self
    }

    pub fn insert(&mut self, id: &str, element: MemoryElement) {
        if self.elements.insert(id.to_string(), element).is_none() {
            self.order.push(id.to_string());
        }
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.get_mut(id)
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.log
    }

    /// Mutations that touched one element.
    pub fn mutations_of(&self, id: &str) -> Vec<&Mutation> {
        self.log.iter().filter(|m| m.target() == id).collect()
    }

    /// The ingredient page: the form with `fields`, a hidden spinner and an
    /// empty results area.
    pub fn ingredient_page(ids: &PageIds, fields: Vec<FormField>) -> Self {
        let mut form = MemoryElement::new("form")
            .with_attribute("method", "post")
            .with_attribute("enctype", "multipart/form-data");
        form.fields = fields;

        MemoryDocument::new()
            .with_element(&ids.form_id, form)
            .with_element(
                &ids.spinner_id,
                MemoryElement::new("div")
                    .with_attribute("class", "spinner-border")
                    .with_display(Display::None),
            )
            .with_element(&ids.results_id, MemoryElement::new("div"))
    }

    /// A details trigger and its collapsed panel, paired through aria-controls.
    pub fn with_details(self, trigger_id: &str, panel_id: &str, text: &str) -> Self {
        self.with_element(
            trigger_id,
            MemoryElement::new("h5")
                .with_attribute(ARIA_CONTROLS, panel_id)
                .with_attribute(ARIA_EXPANDED, "false"),
        )
        .with_element(
            panel_id,
            MemoryElement::new("div")
                .with_attribute("class", "details")
                .with_html(text),
        )
    }

    fn get(&self, id: &str, context: &str) -> Result<&MemoryElement, PageError> {
        self.elements
            .get(id)
            .ok_or_else(|| PageError::not_found(id, context))
    }

    fn get_mut(&mut self, id: &str, context: &str) -> Result<&mut MemoryElement, PageError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| PageError::not_found(id, context))
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn display(&self, id: &str) -> Result<Option<Display>, PageError> {
        Ok(self.get(id, "read display")?.display)
    }

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), PageError> {
        self.get_mut(id, "set display")?.display = Some(display);
        self.log.push(Mutation::SetDisplay {
            id: id.to_string(),
            display,
        });
        Ok(())
    }

    fn inner_html(&self, id: &str) -> Result<String, PageError> {
        Ok(self.get(id, "read innerHTML")?.inner_html.clone())
    }

    fn clear_inner_html(&mut self, id: &str) -> Result<(), PageError> {
        self.get_mut(id, "clear innerHTML")?.inner_html.clear();
        self.log.push(Mutation::ClearHtml { id: id.to_string() });
        Ok(())
    }

    fn set_inner_html(&mut self, id: &str, html: &TrustedMarkup) -> Result<(), PageError> {
        self.get_mut(id, "set innerHTML")?.inner_html = html.as_str().to_string();
        self.log.push(Mutation::SetHtml {
            id: id.to_string(),
            html: html.clone(),
        });
        Ok(())
    }

    fn attribute(&self, id: &str, name: &str) -> Result<Option<String>, PageError> {
        Ok(self.get(id, "read attribute")?.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), PageError> {
        self.get_mut(id, "set attribute")?
            .attributes
            .insert(name.to_string(), value.to_string());
        self.log.push(Mutation::SetAttribute {
            id: id.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn form_fields(&self, form_id: &str) -> Result<Vec<FormField>, PageError> {
        let element = self.get(form_id, "capture form")?;
        if element.tag != "form" {
            return Err(PageError::NotAForm(form_id.to_string()));
        }
        Ok(element.fields.clone())
    }

    fn ids_with_attribute(&self, name: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| {
                self.elements
                    .get(id.as_str())
                    .is_some_and(|e| e.attributes.contains_key(name))
            })
            .cloned()
            .collect()
    }
}
