use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical date format for the ledger (`2025-01-31`).
/// Dates in any other format are treated as unparsable.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ledger column headers, in file order: date, amount, category,
/// subcategory, comment.
pub const LEDGER_HEADER: [&str; 5] = ["Дата", "Сума", "Категорія", "Підкатегорія", "Коментар"];

/// Largest accepted amount magnitude. Keeps every ledger total finite.
pub const MAX_AMOUNT: f64 = 1e12;

/// One ledger row exactly as stored.
///
/// All fields are kept as text. Parsing `date` and `amount` is the consumer's
/// job (see [`Expense::from_record`]), so a hand-edited row with a bad value
/// still round-trips through the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "Дата")]
    pub date: String,

    #[serde(rename = "Сума")]
    pub amount: String,

    #[serde(rename = "Категорія")]
    pub category: String,

    #[serde(rename = "Підкатегорія")]
    pub subcategory: String,

    /// Free text, may be empty
    #[serde(rename = "Коментар")]
    pub comment: String,
}

impl ExpenseRecord {
    /// Build a record from typed values, formatting date and amount canonically.
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            amount: amount.to_string(),
            category: category.into(),
            subcategory: subcategory.into(),
            comment: comment.into(),
        }
    }

    /// Build a record from raw form input, as typed by the user.
    pub fn raw(
        date: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            comment: comment.into(),
        }
    }
}

/// A ledger row with a parsed date and amount, ready for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub comment: String,
}

impl Expense {
    /// Parse a stored record. Returns `None` if the date or the amount
    /// does not parse, or the amount is out of range.
    #[must_use]
    pub fn from_record(record: &ExpenseRecord) -> Option<Self> {
        Some(Self {
            date: parse_date(&record.date)?,
            amount: parse_amount(&record.amount)?,
            category: record.category.clone(),
            subcategory: record.subcategory.clone(),
            comment: record.comment.clone(),
        })
    }
}

/// Parse a ledger date in [`DATE_FORMAT`]. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a ledger amount. Rejects NaN, infinities and anything beyond
/// [`MAX_AMOUNT`] in magnitude.
#[must_use]
pub fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= MAX_AMOUNT)
}
