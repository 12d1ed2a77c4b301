//! Page interaction layer for the ingredient analysis page.
//!
//! The submission flow (`page::controller`) and the details toggle
//! (`page::toggle`) operate on any [`dom::document::Document`]; the
//! [`page::event_loop::PageEventLoop`] wires both to page events and runs the
//! backend request off the page thread.

pub mod cli;
pub mod dom;
pub mod form;
pub mod page;
pub mod trace;
pub mod transport;
