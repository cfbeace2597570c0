use std::error::Error;
use std::process::exit;

use clap::Parser;

use finance_tracker::{Backend, StoreConfig, Transaction, TransactionStore};

/// A utility for creating a store filled with sample transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The kind of store to create.
    #[arg(long, value_enum, default_value_t = Backend::Csv)]
    backend: Backend,

    /// File path to save the store to.
    #[arg(long, short)]
    output_path: String,

    /// The number of months of transactions to create, ending in December 2025.
    #[arg(long, default_value_t = 12)]
    months: u8,
}

/// Create and populate a store for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = StoreConfig::new(args.backend, Some(args.output_path.into()));

    if config.path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("Output path must include a file extension (e.g., 'transactions.csv').");
        exit(1);
    }

    if config.path.is_file() {
        eprintln!("File already exists at {:#?}!", config.path);
        exit(1);
    }

    if args.months == 0 || args.months > 12 {
        eprintln!("Months must be between 1 and 12.");
        exit(1);
    }

    println!("Creating {} store at {:#?}", config.backend, config.path);
    let store = config.open();

    let transactions = sample_year(args.months);
    println!("Saving {} transactions...", transactions.len());
    store.save(&transactions)?;

    println!("Success!");

    Ok(())
}

fn sample_year(months: u8) -> Vec<Transaction> {
    let first_month = 13 - months;

    (first_month..=12)
        .flat_map(|month| {
            let variation = f64::from(month) * 3.5;

            [
                Transaction::new(&format!("2025-{month:02}-01"), 4200.0, "Salary", "Salary"),
                Transaction::new(&format!("2025-{month:02}-02"), -1650.0, "Rent", "Rent"),
                Transaction::new(
                    &format!("2025-{month:02}-09"),
                    -(180.0 + variation),
                    "Food",
                    "Groceries",
                ),
                Transaction::new(
                    &format!("2025-{month:02}-18"),
                    -(45.0 + variation),
                    "Entertainment",
                    "Cinema, dinner",
                ),
            ]
        })
        .collect()
}
