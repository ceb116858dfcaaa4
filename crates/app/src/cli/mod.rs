use clap::{Parser, Subcommand};

mod account;
mod args;
mod bill;
mod dashboard;
mod db;
mod item;
mod output;
mod transactions;

#[derive(Debug, Parser)]
#[command(name = "viyaabhaaram-app", about = "Viyaabhaaram point of sale", long_about = None)]
pub(crate) struct Cli {
    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, global = true, default_value = "warn")]
    pub(crate) log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Account(account::AccountCommand),
    Item(item::ItemCommand),

    /// Bill items and record the sale
    Bill(bill::BillArgs),
    Transactions(transactions::TransactionsCommand),

    /// Show inventory value and total sales
    Dashboard(dashboard::DashboardArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Account(command) => account::run(command).await,
            Commands::Item(command) => item::run(command).await,
            Commands::Bill(args) => bill::run(args).await,
            Commands::Transactions(command) => transactions::run(command).await,
            Commands::Dashboard(args) => dashboard::run(args).await,
        }
    }
}
