use crate::errors::CoreError;
use crate::models::expense::ExpenseRecord;

/// Persistence backend for the expense ledger.
///
/// The ledger is read and written as a whole. `ExpenseStore` only talks to
/// this trait, so the CSV file can be replaced (append log, embedded
/// database) without touching callers.
pub trait LedgerStorage: Send {
    /// Human-readable location (for logs/errors).
    fn location(&self) -> String;

    /// Create an empty ledger if none exists, otherwise check that the stored
    /// one is readable. Returns `true` if one was created.
    fn ensure_exists(&self) -> Result<bool, CoreError>;

    /// Every stored record, in storage order.
    fn read_all(&self) -> Result<Vec<ExpenseRecord>, CoreError>;

    /// Replace the stored ledger with `records`. Must be all-or-nothing.
    fn write_all(&self, records: &[ExpenseRecord]) -> Result<(), CoreError>;
}

/// Extra acceptance rule run by `ExpenseStore::add` after the built-in
/// required-field checks.
pub trait RecordValidator: Send + Sync {
    fn validate(&self, record: &ExpenseRecord) -> Result<(), CoreError>;
}
