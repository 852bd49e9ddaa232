pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    analytics::{AnalyticsOutcome, AnalyticsView},
    expense::ExpenseRecord,
    settings::TrackerConfig,
    taxonomy::Taxonomy,
};
use services::{analytics_service::AnalyticsService, record_validation::TaxonomyValidator};
use storage::{category_store::CategoryStore, expense_store::ExpenseStore};

use errors::CoreError;

/// Main entry point for the Expense Tracker core library.
/// Owns both stores and the analytics engine; front ends only talk to this.
#[must_use]
pub struct ExpenseTracker {
    categories: CategoryStore,
    expenses: ExpenseStore,
    analytics_service: AnalyticsService,
    /// Whether new expenses must reference an existing category/subcategory.
    check_categories: bool,
}

impl std::fmt::Debug for ExpenseTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("categories", &self.categories.path())
            .field("expenses", &self.expenses)
            .field("check_categories", &self.check_categories)
            .finish()
    }
}

impl ExpenseTracker {
    /// Open both stores, creating the default taxonomy and an empty ledger
    /// on first run.
    pub fn open(config: &TrackerConfig) -> Result<Self, CoreError> {
        let categories = CategoryStore::open(config.categories_path.clone())?;
        let expenses = ExpenseStore::open(config.ledger_path.clone())?;
        let mut tracker = Self {
            categories,
            expenses,
            analytics_service: AnalyticsService::new(),
            check_categories: false,
        };
        if config.check_categories {
            tracker.enable_category_check();
        }
        Ok(tracker)
    }

    // ── Categories ──────────────────────────────────────────────────

    /// Snapshot of the current taxonomy.
    pub fn taxonomy(&self) -> Taxonomy {
        self.categories.taxonomy()
    }

    /// Category names for the category picker.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.categories.category_names()
    }

    /// Subcategory names for the subcategory picker. Empty for an unknown category.
    #[must_use]
    pub fn subcategories(&self, category: &str) -> Vec<String> {
        self.categories.subcategories(category)
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), CoreError> {
        self.categories.add_category(name)?;
        self.refresh_category_check();
        Ok(())
    }

    /// Remove a category with all its subcategories.
    /// Existing expenses keep the old names.
    pub fn remove_category(&mut self, name: &str) -> Result<(), CoreError> {
        self.categories.remove_category(name)?;
        self.refresh_category_check();
        Ok(())
    }

    pub fn add_subcategory(&mut self, category: &str, name: &str) -> Result<(), CoreError> {
        self.categories.add_subcategory(category, name)?;
        self.refresh_category_check();
        Ok(())
    }

    pub fn remove_subcategory(&mut self, category: &str, name: &str) -> Result<(), CoreError> {
        self.categories.remove_subcategory(category, name)?;
        self.refresh_category_check();
        Ok(())
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Validate and persist one expense.
    pub fn add_expense(&self, record: ExpenseRecord) -> Result<(), CoreError> {
        self.expenses.add(record)
    }

    /// All stored expenses in ledger order, unparsed.
    pub fn get_expenses(&self) -> Result<Vec<ExpenseRecord>, CoreError> {
        self.expenses.get_all()
    }

    pub fn expense_count(&self) -> Result<usize, CoreError> {
        self.expenses.len()
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Compute one aggregate view over the current ledger.
    pub fn analytics(&self, view: AnalyticsView) -> Result<AnalyticsOutcome, CoreError> {
        let records = self.expenses.get_all()?;
        Ok(self.analytics_service.run(view, &records))
    }

    // ── Referential check ───────────────────────────────────────────

    /// Require new expenses to name an existing category/subcategory pair.
    pub fn enable_category_check(&mut self) {
        self.check_categories = true;
        self.refresh_category_check();
    }

    /// Go back to accepting any category/subcategory names.
    pub fn disable_category_check(&mut self) {
        self.check_categories = false;
        self.expenses.clear_validator();
    }

    #[must_use]
    pub fn is_category_check_enabled(&self) -> bool {
        self.check_categories
    }

    // ── Internal ────────────────────────────────────────────────────

    fn refresh_category_check(&mut self) {
        if self.check_categories {
            let validator = TaxonomyValidator::new(self.categories.taxonomy());
            self.expenses.set_validator(Box::new(validator));
        }
    }
}
