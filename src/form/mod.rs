pub mod form_data;
pub mod form_model;
