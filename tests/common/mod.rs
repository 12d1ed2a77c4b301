pub mod backend;
pub mod utils;
