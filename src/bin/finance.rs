use std::{fs, path::PathBuf, process::exit};

use clap::{Args as ClapArgs, Parser, Subcommand};

use finance_tracker::{
    Backend, DEFAULT_CATEGORIES, Error, Ledger, Store, StoreConfig, Transaction, TransactionStore,
    format_currency, render_report, setup_logging, summarize_by_month, today, totals,
};

/// Record income and expenses and summarise them by month.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The kind of file transactions are stored in.
    #[arg(long, value_enum, env = "FINANCE_BACKEND", default_value_t = Backend::Csv)]
    backend: Backend,

    /// File path of the store. Defaults to transactions.csv, transactions.json
    /// or finance.db depending on the backend.
    #[arg(long, env = "FINANCE_STORE")]
    path: Option<PathBuf>,

    /// Canonical timezone name used to work out today's date, e.g. "Pacific/Auckland".
    #[arg(long, env = "FINANCE_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Show debug logs.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty store if one does not exist.
    Init,
    /// Record a new transaction.
    Add(TransactionArgs),
    /// Replace the transaction at INDEX.
    Edit {
        /// The position shown by `list`.
        index: usize,
        #[command(flatten)]
        transaction: TransactionArgs,
    },
    /// Delete the transaction at INDEX.
    Remove {
        /// The position shown by `list`.
        index: usize,
    },
    /// Print every transaction.
    List,
    /// Print income and expenses for each month.
    Summary,
    /// Write an HTML report with a chart of monthly income and expenses.
    Report {
        /// File path to save the report to.
        #[arg(long, short, default_value = "report.html")]
        output: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
struct TransactionArgs {
    /// Positive for income, negative for an expense.
    #[arg(long, allow_negative_numbers = true)]
    amount: f64,

    /// The date of the transaction as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// E.g. Food, Rent, Salary or Entertainment.
    #[arg(long, default_value = DEFAULT_CATEGORIES[0])]
    category: String,

    /// What the transaction was for.
    #[arg(long)]
    description: String,
}

fn main() {
    let args = Args::parse();

    setup_logging(args.verbose);

    let config = StoreConfig::new(args.backend, args.path.clone());
    let store = config.open();

    if let Err(error) = run(args, &store) {
        tracing::error!("{error:?}");
        eprintln!("Error: {error}");
        exit(1);
    }
}

fn run(args: Args, store: &Store) -> Result<(), Error> {
    match args.command {
        Command::Init => {
            store.initialize()?;
            println!("Store ready at {}", store.path().display());
        }
        Command::Add(transaction) => {
            let transaction = build_transaction(transaction, &args.timezone)?;
            store.append(&transaction)?;
            println!("Added {} {}", transaction.date, format_currency(transaction.amount));
        }
        Command::Edit { index, transaction } => {
            let transaction = build_transaction(transaction, &args.timezone)?;
            let mut ledger = Ledger::load(store)?;
            let old = ledger.replace(index, transaction)?;
            ledger.save(store)?;
            println!("Replaced {} {}", old.date, old.description);
        }
        Command::Remove { index } => {
            let mut ledger = Ledger::load(store)?;
            let removed = ledger.remove(index)?;
            ledger.save(store)?;
            println!("Removed {} {}", removed.date, removed.description);
        }
        Command::List => {
            let transactions = store.load()?;

            for (index, transaction) in transactions.iter().enumerate() {
                println!(
                    "{index:>4}  {}  {:>12}  {:<14}  {}",
                    transaction.date,
                    format_currency(transaction.amount),
                    transaction.category,
                    transaction.description
                );
            }
        }
        Command::Summary => {
            let summaries = summarize_by_month(&store.load()?)?;

            if summaries.is_empty() {
                println!("No Data");
                return Ok(());
            }

            println!("{:<8}  {:>12}  {:>12}", "Month", "Income", "Expense");
            for month in &summaries {
                println!(
                    "{:<8}  {:>12}  {:>12}",
                    month.month,
                    format_currency(month.income),
                    format_currency(month.expense)
                );
            }

            let (income, expense) = totals(&summaries);
            println!(
                "{:<8}  {:>12}  {:>12}",
                "Total",
                format_currency(income),
                format_currency(expense)
            );
        }
        Command::Report { output } => {
            let report = render_report(&store.load()?)?;
            fs::write(&output, report)
                .map_err(|error| Error::Io(format!("{}: {error}", output.display())))?;
            println!("Report written to {}", output.display());
        }
    }

    Ok(())
}

/// Turn the command line fields into a transaction, filling in today's date if needed.
fn build_transaction(args: TransactionArgs, timezone: &str) -> Result<Transaction, Error> {
    let date = match args.date {
        Some(date) => date,
        None => today(timezone)
            .ok_or_else(|| Error::InvalidDate(format!("today in unknown timezone {timezone}")))?
            .to_string(),
    };

    let transaction = Transaction::new(&date, args.amount, &args.category, &args.description);
    // Reject bad dates now rather than when the summary is next computed.
    transaction.parsed_date()?;
    transaction.check_amount()?;

    Ok(transaction)
}
