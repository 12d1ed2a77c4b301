use ingredient_check::{
    dom::{
        document::{Display, Mutation},
        memory::MemoryDocument,
    },
    form::form_model::FormField,
    page::ui_state::PageIds,
};

pub const SCENARIO_A_MARKUP: &str = "<p>3 matches</p>";
pub const ERROR_PARAGRAPH: &str =
    r#"<p class="text-danger">An error occurred. Please try again.</p>"#;

pub fn ids() -> PageIds {
    PageIds::default()
}

/// The ingredient page with its textarea filled in.
pub fn ingredient_doc(ingredients: &str) -> MemoryDocument {
    MemoryDocument::ingredient_page(&ids(), vec![FormField::text("ingredients", ingredients)])
}

/// Display values written to the spinner, in order.
pub fn spinner_writes(doc: &MemoryDocument) -> Vec<Display> {
    doc.mutations_of(&ids().spinner_id)
        .into_iter()
        .filter_map(|m| match m {
            Mutation::SetDisplay { display, .. } => Some(*display),
            _ => None,
        })
        .collect()
}

/// (clears, writes) applied to the results area.
pub fn results_writes(doc: &MemoryDocument) -> (usize, usize) {
    let muts = doc.mutations_of(&ids().results_id);
    let clears = muts
        .iter()
        .filter(|m| matches!(m, Mutation::ClearHtml { .. }))
        .count();
    let writes = muts
        .iter()
        .filter(|m| matches!(m, Mutation::SetHtml { .. }))
        .count();
    (clears, writes)
}
