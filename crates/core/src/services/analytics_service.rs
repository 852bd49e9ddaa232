use std::collections::HashMap;
use std::hash::Hash;

use chrono::Datelike;

use crate::models::analytics::{
    AggregatePoint, AnalyticsOutcome, AnalyticsReport, AnalyticsView, YearMonth,
};
use crate::models::expense::{Expense, ExpenseRecord};

/// How many categories the top-N view keeps.
pub const TOP_N: usize = 5;

/// Computes chart-ready aggregates from a ledger snapshot.
///
/// Pure functions of the input: no I/O, no clock, no randomness. Grouped
/// views list groups in the order they first appear in the ledger, so the
/// same input always yields the same output.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Run one view over raw ledger rows.
    ///
    /// Rows whose date or amount does not parse are skipped (the ledger
    /// itself is not touched). If no row survives, returns `NoData`.
    pub fn run(&self, view: AnalyticsView, records: &[ExpenseRecord]) -> AnalyticsOutcome {
        let expenses = self.clean(records);
        let records_dropped = records.len() - expenses.len();
        if records_dropped > 0 {
            tracing::warn!("analytics skipped {records_dropped} unparsable ledger rows");
        }
        if expenses.is_empty() {
            tracing::debug!("analytics view {view}: no data");
            return AnalyticsOutcome::NoData { records_dropped };
        }

        let points = match view {
            AnalyticsView::ByCategory => self.by_category(&expenses),
            AnalyticsView::BySubcategory => self.by_subcategory(&expenses),
            AnalyticsView::CategoryShare => self.category_share(&expenses),
            AnalyticsView::Monthly => self.monthly(&expenses),
            AnalyticsView::TopCategories => self.top_categories(&expenses, TOP_N),
        };
        tracing::debug!(
            "analytics view {view}: {} points from {} rows",
            points.len(),
            expenses.len()
        );

        AnalyticsOutcome::Report(AnalyticsReport {
            view,
            points,
            records_used: expenses.len(),
            records_dropped,
        })
    }

    /// Parse rows, dropping those with a bad date or amount.
    #[must_use]
    pub fn clean(&self, records: &[ExpenseRecord]) -> Vec<Expense> {
        records.iter().filter_map(Expense::from_record).collect()
    }

    /// Sum per category.
    #[must_use]
    pub fn by_category(&self, expenses: &[Expense]) -> Vec<AggregatePoint> {
        sum_by_key(expenses, |e| e.category.as_str())
            .into_iter()
            .map(|(category, total)| AggregatePoint::new(category, total))
            .collect()
    }

    /// Sum per (category, subcategory), labelled `"<category>: <subcategory>"`.
    #[must_use]
    pub fn by_subcategory(&self, expenses: &[Expense]) -> Vec<AggregatePoint> {
        sum_by_key(expenses, |e| (e.category.as_str(), e.subcategory.as_str()))
            .into_iter()
            .map(|((category, subcategory), total)| {
                AggregatePoint::new(format!("{category}: {subcategory}"), total)
            })
            .collect()
    }

    /// Per-category percentage of the overall total (group / total × 100).
    /// With a zero overall total every share is 0.
    #[must_use]
    pub fn category_share(&self, expenses: &[Expense]) -> Vec<AggregatePoint> {
        let sums = self.by_category(expenses);
        let total: f64 = sums.iter().map(|p| p.value).sum();
        sums.into_iter()
            .map(|p| {
                let share = if total != 0.0 {
                    p.value / total * 100.0
                } else {
                    0.0
                };
                AggregatePoint::new(p.label, share)
            })
            .collect()
    }

    /// Sum per calendar month, oldest first. Months without rows get no point.
    #[must_use]
    pub fn monthly(&self, expenses: &[Expense]) -> Vec<AggregatePoint> {
        let mut months = sum_by_key(expenses, |e| YearMonth {
            year: e.date.year(),
            month: e.date.month(),
        });
        months.sort_by_key(|(month, _)| *month);
        months
            .into_iter()
            .map(|(month, total)| AggregatePoint::new(month.to_string(), total))
            .collect()
    }

    /// The `n` largest category totals, largest first. Equal totals keep
    /// ledger order.
    #[must_use]
    pub fn top_categories(&self, expenses: &[Expense], n: usize) -> Vec<AggregatePoint> {
        let mut sums = self.by_category(expenses);
        // sort_by is stable
        sums.sort_by(|a, b| b.value.total_cmp(&a.value));
        sums.truncate(n);
        sums
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum amounts per key, keys in order of first appearance.
fn sum_by_key<'a, K, F>(expenses: &'a [Expense], key: F) -> Vec<(K, f64)>
where
    K: Eq + Hash + Copy,
    F: Fn(&'a Expense) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut sums: Vec<(K, f64)> = Vec::new();

    for expense in expenses {
        let k = key(expense);
        match index.get(&k) {
            Some(&i) => sums[i].1 += expense.amount,
            None => {
                index.insert(k, sums.len());
                sums.push((k, expense.amount));
            }
        }
    }

    sums
}
