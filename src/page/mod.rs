pub mod controller;
pub mod error;
pub mod event_loop;
pub mod render;
pub mod toggle;
pub mod ui_state;
