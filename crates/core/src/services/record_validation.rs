use crate::errors::CoreError;
use crate::models::expense::{parse_amount, parse_date, ExpenseRecord, DATE_FORMAT, MAX_AMOUNT};
use crate::models::taxonomy::Taxonomy;
use crate::storage::traits::RecordValidator;

/// Built-in acceptance rules for a new ledger row.
///
/// Date, amount, category and subcategory must be non-blank; the comment
/// may be empty. The date must be in the canonical format and the amount a
/// positive number no greater than
/// [`MAX_AMOUNT`].
pub fn validate_record(record: &ExpenseRecord) -> Result<(), CoreError> {
    let required = [
        ("date", &record.date),
        ("amount", &record.amount),
        ("category", &record.category),
        ("subcategory", &record.subcategory),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "required fields are empty: {}",
            missing.join(", ")
        )));
    }

    if parse_date(&record.date).is_none() {
        return Err(CoreError::ValidationError(format!(
            "date '{}' is not in {DATE_FORMAT} format",
            record.date
        )));
    }

    match parse_amount(&record.amount) {
        Some(amount) if amount > 0.0 => Ok(()),
        _ => Err(CoreError::ValidationError(format!(
            "amount '{}' must be a positive number no greater than {MAX_AMOUNT}",
            record.amount
        ))),
    }
}

/// Rejects rows whose category/subcategory pair is not in a taxonomy.
///
/// Holds a snapshot; rebuild it after the taxonomy changes.
#[derive(Debug, Clone)]
pub struct TaxonomyValidator {
    taxonomy: Taxonomy,
}

impl TaxonomyValidator {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }
}

impl RecordValidator for TaxonomyValidator {
    fn validate(&self, record: &ExpenseRecord) -> Result<(), CoreError> {
        if !self.taxonomy.contains_category(&record.category) {
            return Err(CoreError::NotFound(format!("category '{}'", record.category)));
        }
        if !self
            .taxonomy
            .contains_pair(&record.category, &record.subcategory)
        {
            return Err(CoreError::NotFound(format!(
                "subcategory '{}' in '{}'",
                record.subcategory, record.category
            )));
        }
        Ok(())
    }
}
