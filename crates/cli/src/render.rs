//! Plain-text rendering of tracker data.

use std::fmt::Write;

use expense_tracker_core::models::analytics::{AnalyticsReport, AnalyticsView};
use expense_tracker_core::models::expense::{ExpenseRecord, LEDGER_HEADER};
use expense_tracker_core::models::taxonomy::Taxonomy;

const BAR_WIDTH: usize = 40;

pub fn taxonomy(taxonomy: &Taxonomy) -> String {
    let mut out = String::new();
    for entry in taxonomy.iter() {
        let _ = writeln!(out, "{}", entry.name);
        for sub in &entry.subcategories {
            let _ = writeln!(out, "  └ {sub}");
        }
    }
    out
}

pub fn records(records: &[ExpenseRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10}  {:<16} {:<16} {}",
        LEDGER_HEADER[0], LEDGER_HEADER[1], LEDGER_HEADER[2], LEDGER_HEADER[3], LEDGER_HEADER[4]
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<12} {:>10}  {:<16} {:<16} {}",
            r.date, r.amount, r.category, r.subcategory, r.comment
        );
    }
    let _ = writeln!(out, "{} records", records.len());
    out
}

pub fn report(report: &AnalyticsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.view.title());
    let _ = writeln!(out, "{} / {}", report.view.x_label(), report.view.y_label());

    let label_width = report
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = report
        .points
        .iter()
        .map(|p| p.value.abs())
        .fold(0.0_f64, f64::max);

    for point in &report.points {
        let bar_len = if max > 0.0 {
            ((point.value.abs() / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let value = match report.view {
            AnalyticsView::CategoryShare => format!("{:.1}%", point.value),
            _ => format!("{:.2}", point.value),
        };
        let padding = label_width - point.label.chars().count();
        let _ = writeln!(
            out,
            "{}{} {:>12} {}",
            point.label,
            " ".repeat(padding),
            value,
            "█".repeat(bar_len)
        );
    }

    if report.records_dropped > 0 {
        let _ = writeln!(
            out,
            "({} rows skipped: unreadable date or amount)",
            report.records_dropped
        );
    }
    out
}
