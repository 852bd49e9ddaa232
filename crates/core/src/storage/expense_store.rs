use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::CoreError;
use crate::models::expense::ExpenseRecord;
use crate::services::record_validation::validate_record;

use super::file;
use super::format;
use super::traits::{LedgerStorage, RecordValidator};

// ── CSV ledger file ─────────────────────────────────────────────────

/// The ledger as one CSV file, rewritten in full on every change.
#[derive(Debug, Clone)]
pub struct CsvLedgerFile {
    path: PathBuf,
}

impl CsvLedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for CsvLedgerFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn ensure_exists(&self) -> Result<bool, CoreError> {
        match file::read_if_exists(&self.path)? {
            // An existing ledger is never rewritten, only checked
            Some(bytes) => format::read_ledger(&bytes).map(|_| false),
            None => {
                self.write_all(&[])?;
                Ok(true)
            }
        }
    }

    fn read_all(&self) -> Result<Vec<ExpenseRecord>, CoreError> {
        let bytes = file::read_if_exists(&self.path)?.ok_or_else(|| {
            CoreError::StorageRead(format!("{}: ledger does not exist", self.path.display()))
        })?;
        format::read_ledger(&bytes)
    }

    fn write_all(&self, records: &[ExpenseRecord]) -> Result<(), CoreError> {
        let bytes = format::write_ledger(records)?;
        file::write_atomic(&self.path, &bytes)
    }
}

// ── Expense store ───────────────────────────────────────────────────

/// Durable storage of the expense ledger.
///
/// `add` is a read-modify-write of the whole ledger, so its cost grows with
/// the ledger size. All operations on one store serialize on its mutex.
pub struct ExpenseStore<S: LedgerStorage = CsvLedgerFile> {
    storage: Mutex<S>,
    validator: Option<Box<dyn RecordValidator>>,
}

impl ExpenseStore<CsvLedgerFile> {
    /// Open (creating if needed) the CSV ledger at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let store = Self::with_storage(CsvLedgerFile::new(path));
        store.init()?;
        Ok(store)
    }
}

impl<S: LedgerStorage> ExpenseStore<S> {
    /// Wrap a backend without touching it. Call [`ExpenseStore::init`] before use.
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage: Mutex::new(storage),
            validator: None,
        }
    }

    /// Install an extra acceptance rule for `add`, replacing any previous one.
    pub fn set_validator(&mut self, validator: Box<dyn RecordValidator>) {
        self.validator = Some(validator);
    }

    pub fn clear_validator(&mut self) {
        self.validator = None;
    }

    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Make sure the ledger exists with its header. An existing ledger that
    /// does not decode fails with `StorageRead`. Safe to call repeatedly.
    pub fn init(&self) -> Result<(), CoreError> {
        let storage = self.lock();
        if storage.ensure_exists()? {
            tracing::info!("created empty ledger at {}", storage.location());
        }
        Ok(())
    }

    /// Validate and append one record.
    pub fn add(&self, record: ExpenseRecord) -> Result<(), CoreError> {
        if let Err(e) = self.check(&record) {
            tracing::warn!("expense rejected: {e}");
            return Err(e);
        }

        let storage = self.lock();
        let mut records = storage.read_all()?;
        records.push(record);
        storage.write_all(&records)?;
        tracing::info!("expense added; ledger now has {} records", records.len());
        Ok(())
    }

    /// Every stored record, in storage order, unparsed.
    pub fn get_all(&self) -> Result<Vec<ExpenseRecord>, CoreError> {
        let storage = self.lock();
        let records = storage.read_all()?;
        tracing::debug!("read {} records from {}", records.len(), storage.location());
        Ok(records)
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.lock().read_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }

    fn check(&self, record: &ExpenseRecord) -> Result<(), CoreError> {
        validate_record(record)?;
        match &self.validator {
            Some(validator) => validator.validate(record),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: LedgerStorage> std::fmt::Debug for ExpenseStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("location", &self.lock().location())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
