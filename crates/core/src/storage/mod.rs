pub mod category_store;
pub mod expense_store;
pub mod file;
pub mod format;
pub mod traits;
