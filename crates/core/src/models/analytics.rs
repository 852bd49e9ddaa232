use serde::{Deserialize, Serialize};

/// The aggregate views offered by the analytics tab, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyticsView {
    /// Total spent per category (bar chart)
    ByCategory,
    /// Total spent per category/subcategory pair (bar chart)
    BySubcategory,
    /// Each category's share of total spending, in percent (pie chart)
    CategoryShare,
    /// Total spent per calendar month, oldest first (line chart)
    Monthly,
    /// The five categories with the highest totals (horizontal bar chart)
    TopCategories,
}

impl AnalyticsView {
    pub const ALL: [AnalyticsView; 5] = [
        AnalyticsView::ByCategory,
        AnalyticsView::BySubcategory,
        AnalyticsView::CategoryShare,
        AnalyticsView::Monthly,
        AnalyticsView::TopCategories,
    ];

    /// Short identifier used on the command line.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            AnalyticsView::ByCategory => "by-category",
            AnalyticsView::BySubcategory => "by-subcategory",
            AnalyticsView::CategoryShare => "share",
            AnalyticsView::Monthly => "monthly",
            AnalyticsView::TopCategories => "top",
        }
    }

    /// Chart title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            AnalyticsView::ByCategory => "Expenses by category",
            AnalyticsView::BySubcategory => "Expenses by subcategory",
            AnalyticsView::CategoryShare => "Expense structure by category",
            AnalyticsView::Monthly => "Monthly expense dynamics",
            AnalyticsView::TopCategories => "Top 5 expense categories",
        }
    }

    #[must_use]
    pub fn x_label(&self) -> &'static str {
        match self {
            AnalyticsView::ByCategory | AnalyticsView::CategoryShare => "Category",
            AnalyticsView::BySubcategory => "Category: Subcategory",
            AnalyticsView::Monthly => "Month",
            AnalyticsView::TopCategories => "Total spent",
        }
    }

    #[must_use]
    pub fn y_label(&self) -> &'static str {
        match self {
            AnalyticsView::CategoryShare => "Share, %",
            AnalyticsView::TopCategories => "Category",
            _ => "Total spent",
        }
    }
}

impl std::fmt::Display for AnalyticsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for AnalyticsView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalyticsView::ALL
            .into_iter()
            .find(|v| v.id() == s.trim())
            .ok_or_else(|| {
                let known: Vec<&str> = AnalyticsView::ALL.iter().map(|v| v.id()).collect();
                format!("unknown view '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Calendar month bucket key. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One labelled value of an aggregate (a bar, a pie slice, a line point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub label: String,
    pub value: f64,
}

impl AggregatePoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A computed view, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub view: AnalyticsView,

    /// Points in rendering order
    pub points: Vec<AggregatePoint>,

    /// Number of ledger rows that parsed and were aggregated
    pub records_used: usize,

    /// Number of ledger rows skipped because the date or amount did not parse
    pub records_dropped: usize,
}

impl AnalyticsReport {
    /// Look up a point by label.
    #[must_use]
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.points.iter().find(|p| p.label == label).map(|p| p.value)
    }
}

/// Result of running a view: either a report or nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalyticsOutcome {
    /// No ledger row survived preprocessing.
    NoData { records_dropped: usize },
    Report(AnalyticsReport),
}

impl AnalyticsOutcome {
    /// The report, if there was data.
    #[must_use]
    pub fn report(&self) -> Option<&AnalyticsReport> {
        match self {
            AnalyticsOutcome::Report(report) => Some(report),
            AnalyticsOutcome::NoData { .. } => None,
        }
    }

    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, AnalyticsOutcome::NoData { .. })
    }
}
