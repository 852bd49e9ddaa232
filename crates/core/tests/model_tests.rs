// ═══════════════════════════════════════════════════════════════════
// Model Tests: Taxonomy, ExpenseRecord/Expense, AnalyticsView
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::analytics::{AnalyticsView, YearMonth};
use expense_tracker_core::models::expense::{
    parse_amount, parse_date, Expense, ExpenseRecord, DATE_FORMAT, MAX_AMOUNT,
};
use expense_tracker_core::models::taxonomy::Taxonomy;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Taxonomy
// ═══════════════════════════════════════════════════════════════════

mod taxonomy {
    use super::*;

    #[test]
    fn builtin_has_four_categories_in_order() {
        let t = Taxonomy::builtin();
        assert_eq!(t.category_names(), vec!["Rent", "Transport", "Payroll", "Other"]);
        assert_eq!(
            t.subcategories("Transport").unwrap(),
            &["Taxi".to_string(), "Car".to_string(), "PublicTransit".to_string()]
        );
        assert!(t.validate().is_ok());
    }

    #[test]
    fn new_is_empty() {
        let t = Taxonomy::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }

    #[test]
    fn add_category_appends_with_no_subcategories() {
        let mut t = Taxonomy::builtin();
        t.add_category("Food").unwrap();
        assert_eq!(t.category_names().last(), Some(&"Food"));
        assert!(t.subcategories("Food").unwrap().is_empty());
    }

    #[test]
    fn add_category_trims_input() {
        let mut t = Taxonomy::new();
        t.add_category("  Food  ").unwrap();
        assert!(t.contains_category("Food"));
    }

    #[test]
    fn add_duplicate_category_fails_and_leaves_state() {
        let mut t = Taxonomy::builtin();
        let before = t.clone();
        let err = t.add_category("Rent").unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCategory(ref n) if n == "Rent"));
        assert_eq!(t, before);
    }

    #[test]
    fn add_empty_category_fails() {
        let mut t = Taxonomy::new();
        assert!(matches!(t.add_category(""), Err(CoreError::DuplicateCategory(_))));
        assert!(matches!(t.add_category("   "), Err(CoreError::DuplicateCategory(_))));
        assert!(t.is_empty());
    }

    #[test]
    fn lookups_trim_like_additions() {
        let mut t = Taxonomy::new();
        t.add_category(" Food ").unwrap();
        t.add_subcategory(" Food ", " Lunch ").unwrap();
        assert!(t.contains_category(" Food "));
        assert!(t.contains_pair("Food", " Lunch "));
        assert_eq!(t.subcategories(" Food ").unwrap(), &["Lunch".to_string()]);

        t.remove_subcategory(" Food ", " Lunch ").unwrap();
        assert!(t.subcategories("Food").unwrap().is_empty());
        let removed = t.remove_category(" Food ").unwrap();
        assert_eq!(removed.name, "Food");
        assert!(t.is_empty());
    }

    #[test]
    fn category_names_are_case_sensitive() {
        let mut t = Taxonomy::builtin();
        t.add_category("rent").unwrap();
        assert!(t.contains_category("Rent"));
        assert!(t.contains_category("rent"));
    }

    #[test]
    fn remove_category_drops_subcategories() {
        let mut t = Taxonomy::builtin();
        let removed = t.remove_category("Payroll").unwrap();
        assert_eq!(removed.subcategories, vec!["Staff", "Freelancers"]);
        assert!(!t.contains_category("Payroll"));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn remove_missing_category_is_not_found() {
        let mut t = Taxonomy::builtin();
        let before = t.clone();
        assert!(matches!(t.remove_category("Food"), Err(CoreError::NotFound(_))));
        assert_eq!(t, before);
    }

    #[test]
    fn add_subcategory_preserves_order() {
        let mut t = Taxonomy::builtin();
        t.add_subcategory("Rent", "Garage").unwrap();
        assert_eq!(
            t.subcategories("Rent").unwrap(),
            &["Office", "Warehouse", "Home", "Garage"].map(String::from)
        );
    }

    #[test]
    fn add_subcategory_to_missing_category_is_not_found() {
        let mut t = Taxonomy::builtin();
        assert!(matches!(
            t.add_subcategory("Food", "Lunch"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn add_duplicate_subcategory_fails() {
        let mut t = Taxonomy::builtin();
        let err = t.add_subcategory("Rent", "Office").unwrap_err();
        match err {
            CoreError::DuplicateSubcategory { category, name } => {
                assert_eq!(category, "Rent");
                assert_eq!(name, "Office");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn add_empty_subcategory_fails() {
        let mut t = Taxonomy::builtin();
        assert!(matches!(
            t.add_subcategory("Rent", " "),
            Err(CoreError::DuplicateSubcategory { .. })
        ));
    }

    #[test]
    fn same_subcategory_allowed_in_different_categories() {
        let mut t = Taxonomy::builtin();
        t.add_subcategory("Transport", "Office").unwrap();
        assert!(t.contains_pair("Rent", "Office"));
        assert!(t.contains_pair("Transport", "Office"));
    }

    #[test]
    fn remove_subcategory() {
        let mut t = Taxonomy::builtin();
        t.remove_subcategory("Rent", "Warehouse").unwrap();
        assert_eq!(
            t.subcategories("Rent").unwrap(),
            &["Office".to_string(), "Home".to_string()]
        );
    }

    #[test]
    fn remove_missing_subcategory_is_not_found() {
        let mut t = Taxonomy::builtin();
        assert!(matches!(
            t.remove_subcategory("Rent", "Garage"),
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            t.remove_subcategory("Food", "Office"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicates_and_empty_names() {
        let dup = Taxonomy::from_pairs([("A", vec!["x"]), ("A", vec!["y"])]);
        assert!(matches!(dup.validate(), Err(CoreError::ValidationError(_))));

        let dup_sub = Taxonomy::from_pairs([("A", vec!["x", "x"])]);
        assert!(dup_sub.validate().is_err());

        let empty = Taxonomy::from_pairs([("", Vec::<String>::new())]);
        assert!(empty.validate().is_err());

        let empty_sub = Taxonomy::from_pairs([("A", vec![""])]);
        assert!(empty_sub.validate().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Taxonomy JSON
// ═══════════════════════════════════════════════════════════════════

mod taxonomy_json {
    use super::*;

    #[test]
    fn serializes_as_object_in_insertion_order() {
        let t = Taxonomy::from_pairs([("Zeta", vec!["b", "a"]), ("Alpha", vec!["c"])]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"Zeta":["b","a"],"Alpha":["c"]}"#);
    }

    #[test]
    fn round_trip_preserves_order() {
        let t = Taxonomy::from_pairs([
            ("Оренда", vec!["Офіс", "Склад"]),
            ("Alpha", vec!["z", "y", "x"]),
            ("Beta", Vec::<&str>::new()),
        ]);
        let json = serde_json::to_string_pretty(&t).unwrap();
        let back: Taxonomy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.category_names(), vec!["Оренда", "Alpha", "Beta"]);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result: Result<Taxonomy, _> = serde_json::from_str(r#"{"A":["x"],"A":["y"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn loaded_names_are_trimmed() {
        let t: Taxonomy = serde_json::from_str(r#"{" Food ":[" Lunch "]}"#).unwrap();
        assert_eq!(t, Taxonomy::from_pairs([("Food", vec!["Lunch"])]));

        let clash: Result<Taxonomy, _> = serde_json::from_str(r#"{"A":[],"A ":[]}"#);
        assert!(clash.is_err());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_str::<Taxonomy>(r#"["A","B"]"#).is_err());
        assert!(serde_json::from_str::<Taxonomy>(r#"{"A":"x"}"#).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Expense records
// ═══════════════════════════════════════════════════════════════════

mod expense {
    use super::*;

    #[test]
    fn new_formats_canonically() {
        let r = ExpenseRecord::new(date(2025, 1, 5), 100.0, "Rent", "Office", "");
        assert_eq!(r.date, "2025-01-05");
        assert_eq!(r.amount, "100");
        assert_eq!(r.comment, "");

        let r = ExpenseRecord::new(date(2025, 1, 5), 12.5, "Rent", "Office", "half");
        assert_eq!(r.amount, "12.5");
    }

    #[test]
    fn date_format_constant() {
        assert_eq!(date(2024, 12, 31).format(DATE_FORMAT).to_string(), "2024-12-31");
    }

    #[test]
    fn parse_date_only_accepts_iso() {
        assert_eq!(parse_date("2025-03-01"), Some(date(2025, 3, 1)));
        assert_eq!(parse_date(" 2025-03-01 "), Some(date(2025, 3, 1)));
        assert_eq!(parse_date("01.03.2025"), None);
        assert_eq!(parse_date("03/01/2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parse_amount_accepts_numbers() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount(" 12.75 "), Some(12.75));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn parse_amount_enforces_ceiling() {
        assert_eq!(parse_amount(&MAX_AMOUNT.to_string()), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("1e13"), None);
        assert_eq!(parse_amount("1e308"), None);
        assert_eq!(parse_amount("-1e308"), None);
    }

    #[test]
    fn from_record_parses_typed_fields() {
        let r = ExpenseRecord::raw("2025-02-10", "42.5", "Transport", "Taxi", "airport");
        let e = Expense::from_record(&r).unwrap();
        assert_eq!(e.date, date(2025, 2, 10));
        assert_eq!(e.amount, 42.5);
        assert_eq!(e.category, "Transport");
        assert_eq!(e.subcategory, "Taxi");
        assert_eq!(e.comment, "airport");
    }

    #[test]
    fn from_record_rejects_bad_date_or_amount() {
        assert!(Expense::from_record(&ExpenseRecord::raw("garbage", "1", "A", "B", "")).is_none());
        assert!(Expense::from_record(&ExpenseRecord::raw("2025-01-01", "x", "A", "B", "")).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Analytics view metadata
// ═══════════════════════════════════════════════════════════════════

mod analytics_view {
    use super::*;

    #[test]
    fn all_lists_five_views_in_menu_order() {
        assert_eq!(AnalyticsView::ALL.len(), 5);
        assert_eq!(AnalyticsView::ALL[0], AnalyticsView::ByCategory);
        assert_eq!(AnalyticsView::ALL[4], AnalyticsView::TopCategories);
    }

    #[test]
    fn ids_parse_back() {
        for view in AnalyticsView::ALL {
            assert_eq!(view.id().parse::<AnalyticsView>().unwrap(), view);
            assert_eq!(view.to_string(), view.id());
        }
    }

    #[test]
    fn unknown_id_lists_choices() {
        let err = "pie".parse::<AnalyticsView>().unwrap_err();
        assert!(err.contains("pie"));
        assert!(err.contains("by-category"));
        assert!(err.contains("monthly"));
    }

    #[test]
    fn titles_are_distinct() {
        let mut titles: Vec<&str> = AnalyticsView::ALL.iter().map(|v| v.title()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 5);
    }

    #[test]
    fn year_month_orders_and_displays() {
        let dec = YearMonth { year: 2024, month: 12 };
        let jan = YearMonth { year: 2025, month: 1 };
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2025-01");
    }
}
