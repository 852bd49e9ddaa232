use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::analytics::{AnalyticsOutcome, AnalyticsView};
use expense_tracker_core::models::expense::{ExpenseRecord, DATE_FORMAT};
use expense_tracker_core::models::settings::{
    TrackerConfig, DEFAULT_CATEGORIES_PATH, DEFAULT_LEDGER_PATH,
};
use expense_tracker_core::ExpenseTracker;

mod render;

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Record expenses by category and summarise spending")]
struct Cli {
    /// Category/subcategory JSON document.
    #[arg(long, default_value = DEFAULT_CATEGORIES_PATH)]
    categories: PathBuf,

    /// Expense CSV ledger.
    #[arg(long, default_value = DEFAULT_LEDGER_PATH)]
    ledger: PathBuf,

    /// Reject expenses whose category/subcategory is not in the taxonomy.
    #[arg(long)]
    strict: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the category tree.
    Categories,
    /// Add a category with no subcategories.
    AddCategory { name: String },
    /// Delete a category and all its subcategories.
    RemoveCategory {
        name: String,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Add a subcategory to a category.
    AddSubcategory { category: String, name: String },
    /// Delete one subcategory.
    RemoveSubcategory {
        category: String,
        name: String,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Record an expense.
    Add {
        amount: String,
        category: String,
        subcategory: String,
        /// Expense date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// List all recorded expenses.
    List,
    /// Show an aggregate: by-category, by-subcategory, share, monthly, top.
    Report { view: AnalyticsView },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},expense_tracker_core={level}"
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut config = TrackerConfig::new(cli.categories, cli.ledger);
    config.check_categories = cli.strict;

    let mut tracker = match ExpenseTracker::open(&config) {
        Ok(tracker) => tracker,
        Err(err) => {
            tracing::error!("failed to open stores: {err}");
            eprintln!("Cannot open expense data: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut tracker, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_recoverable() => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            tracing::error!("storage failure: {err}");
            eprintln!("Storage failure: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(tracker: &mut ExpenseTracker, command: Command) -> Result<(), CoreError> {
    match command {
        Command::Categories => {
            print!("{}", render::taxonomy(&tracker.taxonomy()));
        }
        Command::AddCategory { name } => {
            tracker.add_category(&name)?;
            println!("Category '{}' added.", name.trim());
        }
        Command::RemoveCategory { name, yes } => {
            if !yes {
                println!("This deletes '{name}' and all its subcategories. Re-run with --yes to confirm.");
                return Ok(());
            }
            tracker.remove_category(&name)?;
            println!("Category '{name}' removed.");
        }
        Command::AddSubcategory { category, name } => {
            tracker.add_subcategory(&category, &name)?;
            println!("Subcategory '{}' added to '{category}'.", name.trim());
        }
        Command::RemoveSubcategory {
            category,
            name,
            yes,
        } => {
            if !yes {
                println!("This deletes '{name}' from '{category}'. Re-run with --yes to confirm.");
                return Ok(());
            }
            tracker.remove_subcategory(&category, &name)?;
            println!("Subcategory '{name}' removed from '{category}'.");
        }
        Command::Add {
            amount,
            category,
            subcategory,
            date,
            comment,
        } => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format(DATE_FORMAT)
                    .to_string()
            });
            tracker.add_expense(ExpenseRecord::raw(date, amount, category, subcategory, comment))?;
            println!("Expense added.");
        }
        Command::List => {
            let records = tracker.get_expenses()?;
            print!("{}", render::records(&records));
        }
        Command::Report { view } => match tracker.analytics(view)? {
            AnalyticsOutcome::NoData { .. } => println!("No data to show."),
            AnalyticsOutcome::Report(report) => print!("{}", render::report(&report)),
        },
    }
    Ok(())
}
