pub mod document;
pub mod markup;
pub mod memory;
