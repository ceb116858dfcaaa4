use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct TransactionsCommand {
    #[command(subcommand)]
    command: TransactionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum TransactionsSubcommand {
    /// List recorded transactions, newest first
    List(list::ListTransactionsArgs),
}

pub(crate) async fn run(command: TransactionsCommand) -> Result<(), String> {
    match command.command {
        TransactionsSubcommand::List(args) => list::run(args).await,
    }
}
