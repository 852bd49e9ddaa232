use crate::errors::CoreError;
use crate::models::expense::{ExpenseRecord, LEDGER_HEADER};
use crate::models::taxonomy::Taxonomy;

// ── Taxonomy document (JSON) ────────────────────────────────────────

/// Encode a taxonomy as pretty-printed UTF-8 JSON.
///
/// Non-ASCII names are written literally, not `\u`-escaped.
pub fn write_taxonomy(taxonomy: &Taxonomy) -> Result<Vec<u8>, CoreError> {
    let mut bytes = serde_json::to_vec_pretty(taxonomy)
        .map_err(|e| CoreError::StorageWrite(format!("Failed to serialize categories: {e}")))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a taxonomy document. Rejects anything that is not a JSON object of
/// string → list-of-strings, and any document that breaks the naming rules.
pub fn read_taxonomy(data: &[u8]) -> Result<Taxonomy, CoreError> {
    serde_json::from_slice(data)
        .map_err(|e| CoreError::StorageRead(format!("Malformed categories document: {e}")))
}

// ── Ledger document (CSV) ───────────────────────────────────────────

/// Encode the full ledger: header row, then one row per record.
///
/// ```text
/// Дата,Сума,Категорія,Підкатегорія,Коментар
/// 2025-01-15,100,Rent,Office,"January, first half"
/// ```
pub fn write_ledger(records: &[ExpenseRecord]) -> Result<Vec<u8>, CoreError> {
    let write_err = |e: csv::Error| CoreError::StorageWrite(format!("Failed to encode ledger: {e}"));

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(LEDGER_HEADER).map_err(write_err)?;
    for record in records {
        writer.serialize(record).map_err(write_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| CoreError::StorageWrite(format!("Failed to encode ledger: {e}")))
}

/// Decode a ledger document. The header must match [`LEDGER_HEADER`]
/// exactly and every row must have five fields.
pub fn read_ledger(data: &[u8]) -> Result<Vec<ExpenseRecord>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader.headers()?;
    if !headers.iter().eq(LEDGER_HEADER.iter().copied()) {
        return Err(CoreError::StorageRead(format!(
            "Unexpected ledger header: [{}] (expected [{}])",
            headers.iter().collect::<Vec<_>>().join(","),
            LEDGER_HEADER.join(","),
        )));
    }

    let records = reader
        .deserialize::<ExpenseRecord>()
        .collect::<Result<Vec<_>, csv::Error>>()?;
    Ok(records)
}
