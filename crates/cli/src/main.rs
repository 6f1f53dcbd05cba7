use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use libtrackor::config::Config;
use libtrackor::protocol::ExportFormat;
use libtrackor::requests::{AddExpense, DateRange, Summarize, UpdateExpense};
use libtrackor::transport::{Outcome, Transport};
use libtrackor::ExpenseClient;

/// Trackor - expense-tracking dashboard for a remote MCP server
#[derive(Parser)]
#[command(name = "trackor", version, about)]
struct Cli {
    /// Remote MCP endpoint URL (overrides TRACKOR_ENDPOINT and the config file)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a new expense
    Add {
        /// Expense date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Amount spent
        #[arg(long)]
        amount: f64,

        /// Expense category
        #[arg(long)]
        category: String,

        /// Subcategory (sent even when empty)
        #[arg(long, default_value = "")]
        subcategory: String,

        /// Free-form note
        #[arg(long, default_value = "")]
        note: String,
    },

    /// List all expenses
    List,

    /// Fetch a single expense by id
    Get {
        /// Expense id
        expense_id: u64,
    },

    /// Update fields on an existing expense
    Update {
        /// Expense id to update
        expense_id: u64,

        /// New date
        #[arg(long)]
        date: Option<NaiveDate>,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New subcategory
        #[arg(long)]
        subcategory: Option<String>,

        /// New note
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id to delete
        expense_id: u64,
    },

    /// Delete every expense in a date range
    DeleteRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },

    /// Summarize spending over a date range
    Summarize {
        start_date: NaiveDate,
        end_date: NaiveDate,

        /// Restrict the summary to one category
        #[arg(long)]
        category: Option<String>,

        /// Break totals down by subcategory
        #[arg(long)]
        group_by_subcategory: bool,
    },

    /// Overall statistics
    Stats,

    /// Export all expenses
    Export {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// List the server's known categories
    Categories,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::load();
    let endpoint = match config.resolve_endpoint(cli.endpoint) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    let transport = match Transport::new(endpoint, &config) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let client = ExpenseClient::new(transport);
    let outcome = run(&client, cli.command);
    let failed = outcome.is_connection_failure();

    // The response is shown verbatim; server-reported errors are still JSON
    // and exit 0. Only a connection-level failure is a nonzero exit.
    let value = outcome.into_value();
    match serde_json::to_string_pretty(&value) {
        Ok(rendered) => println!("{rendered}"),
        Err(_) => println!("{value}"),
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Dispatch one subcommand as exactly one remote call
fn run(client: &ExpenseClient, command: Command) -> Outcome {
    match command {
        Command::Add {
            date,
            amount,
            category,
            subcategory,
            note,
        } => client.add_expense(&AddExpense {
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            amount,
            category,
            subcategory,
            note,
        }),

        Command::List => client.list_expenses(),

        Command::Get { expense_id } => client.get_expense(expense_id),

        Command::Update {
            expense_id,
            date,
            amount,
            category,
            subcategory,
            note,
        } => client.update_expense(&UpdateExpense {
            expense_id,
            date,
            amount,
            category,
            subcategory,
            note,
        }),

        Command::Delete { expense_id } => client.delete_expense(expense_id),

        Command::DeleteRange {
            start_date,
            end_date,
        } => client.delete_range(&DateRange {
            start_date,
            end_date,
        }),

        Command::Summarize {
            start_date,
            end_date,
            category,
            group_by_subcategory,
        } => client.summarize(&Summarize {
            start_date,
            end_date,
            category,
            group_by_subcategory,
        }),

        Command::Stats => client.statistics(),

        Command::Export { format } => client.export(format.into()),

        Command::Categories => client.categories(),
    }
}
