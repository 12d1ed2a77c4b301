use crate::dom::document::{ARIA_CONTROLS, ARIA_EXPANDED, Display, Document, Mutation, apply_all};
use crate::page::error::PageError;
use crate::trace::{logger::TraceLogger, trace::TraceEvent};

/// Panel paired with `trigger_id` through its `aria-controls` attribute.
pub fn controlled_panel(doc: &dyn Document, trigger_id: &str) -> Result<String, PageError> {
    if !doc.contains(trigger_id) {
        return Err(PageError::not_found(trigger_id, "toggle trigger"));
    }

    let panel_id = doc
        .attribute(trigger_id, ARIA_CONTROLS)?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PageError::MissingPairing {
            trigger: trigger_id.to_string(),
        })?;

    if !doc.contains(&panel_id) {
        return Err(PageError::not_found(
            &panel_id,
            &format!("aria-controls of '#{}'", trigger_id),
        ));
    }

    Ok(panel_id)
}

/// Mutations flipping a panel whose inline display is currently `current`.
///
/// Only an explicit `block` counts as shown; a panel with no inline display is
/// treated as hidden and gets opened.
pub fn toggle_plan(trigger_id: &str, panel_id: &str, current: Option<Display>) -> Vec<Mutation> {
    let next = match current {
        Some(Display::Block) => Display::None,
        Some(Display::None) | None => Display::Block,
    };
    let expanded = next == Display::Block;

    vec![
        Mutation::SetDisplay {
            id: panel_id.to_string(),
            display: next,
        },
        Mutation::SetAttribute {
            id: trigger_id.to_string(),
            name: ARIA_EXPANDED.to_string(),
            value: expanded.to_string(),
        },
    ]
}

/// Flip the details panel of `trigger_id`. Returns whether it is now shown.
pub fn toggle_details(
    doc: &mut dyn Document,
    trigger_id: &str,
    tracer: &TraceLogger,
) -> Result<bool, PageError> {
    let panel_id = controlled_panel(doc, trigger_id)?;
    let current = doc.display(&panel_id)?;

    let mutations = toggle_plan(trigger_id, &panel_id, current);
    apply_all(doc, &mutations)?;

    let shown = !matches!(current, Some(Display::Block));
    tracer.log(
        &TraceEvent::now("toggle")
            .with_target(trigger_id)
            .with_detail(if shown { "expanded" } else { "collapsed" }),
    );

    Ok(shown)
}
