use clap::Args;
use viyaabhaaram_app::domain::transactions::models::total_sales;

use crate::cli::{
    args::{ConnectionArgs, LoginArgs, start_session},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct DashboardArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,
}

pub(crate) async fn run(args: DashboardArgs) -> Result<(), String> {
    let (context, session) = start_session(&args.connection, args.login).await?;

    let transactions = context
        .transactions
        .list_transactions(session.account().uuid)
        .await
        .map_err(|error| format!("failed to list transactions: {error}"))?;

    let inventory = session
        .catalog()
        .inventory_value()
        .ok_or("inventory value overflowed")?;

    let sales = total_sales(&transactions).ok_or("total sales overflowed")?;

    println!("business: {}", session.account().business_name);
    println!("items: {}", session.catalog().len());
    println!("inventory_value: {}", output::money(inventory, context.currency));
    println!("total_sales: {}", output::money(sales, context.currency));
    println!("transactions: {}", transactions.len());

    Ok(())
}
