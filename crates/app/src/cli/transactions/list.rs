use std::io;

use clap::Args;
use uuid::Uuid;
use viyaabhaaram::receipt::Bill;

use crate::cli::{
    args::{ConnectionArgs, LoginArgs, start_session},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct ListTransactionsArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// Print the itemised bill of one transaction
    #[arg(long)]
    show: Option<Uuid>,
}

pub(crate) async fn run(args: ListTransactionsArgs) -> Result<(), String> {
    let (context, session) = start_session(&args.connection, args.login).await?;

    let transactions = context
        .transactions
        .list_transactions(session.account().uuid)
        .await
        .map_err(|error| format!("failed to list transactions: {error}"))?;

    if let Some(uuid) = args.show {
        let transaction = transactions
            .iter()
            .find(|transaction| transaction.uuid.into_uuid() == uuid)
            .ok_or_else(|| format!("transaction {uuid} not found"))?;

        return Bill::from_snapshot(&transaction.items_data, context.currency)
            .and_then(|bill| bill.write_to(io::stdout()))
            .map_err(|error| format!("failed to print bill: {error}"));
    }

    if transactions.is_empty() {
        println!("no transactions found");
        return Ok(());
    }

    println!("{}", output::transactions_table(&transactions, context.currency));

    Ok(())
}
