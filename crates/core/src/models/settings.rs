use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the taxonomy document.
pub const DEFAULT_CATEGORIES_PATH: &str = "categories.json";

/// Default location of the expense ledger.
pub const DEFAULT_LEDGER_PATH: &str = "expenses.csv";

/// Where the tracker keeps its two files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Path of the category/subcategory JSON document.
    pub categories_path: PathBuf,

    /// Path of the expense CSV ledger.
    pub ledger_path: PathBuf,

    /// Reject expenses whose category/subcategory pair is not in the taxonomy.
    /// Off by default: the ledger accepts any names.
    #[serde(default)]
    pub check_categories: bool,
}

impl TrackerConfig {
    pub fn new(categories_path: impl Into<PathBuf>, ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            categories_path: categories_path.into(),
            ledger_path: ledger_path.into(),
            check_categories: false,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES_PATH, DEFAULT_LEDGER_PATH)
    }
}
