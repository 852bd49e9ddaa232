pub mod analytics;
pub mod expense;
pub mod settings;
pub mod taxonomy;
