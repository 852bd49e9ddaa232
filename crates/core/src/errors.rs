use thiserror::Error;

/// Unified error type for the entire expense-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Category already exists or has an empty name: '{0}'")]
    DuplicateCategory(String),

    #[error("Subcategory '{name}' already exists in '{category}' or has an empty name")]
    DuplicateSubcategory { category: String, name: String },

    #[error("Not found: {0}")]
    NotFound(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl CoreError {
    /// `true` for conditions the caller should surface to the user as a
    /// message (bad input, name collisions, missing entries). Store state is
    /// unchanged when one of these is returned.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::ValidationError(_)
                | CoreError::DuplicateCategory(_)
                | CoreError::DuplicateSubcategory { .. }
                | CoreError::NotFound(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────
//
// Both document parsers only fail while decoding, so their errors map to
// read failures. Write paths map their errors explicitly.

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::StorageRead(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::StorageRead(e.to_string())
    }
}
