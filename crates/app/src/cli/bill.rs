use std::io;

use clap::Args;
use uuid::Uuid;
use viyaabhaaram::{cart::CartError, receipt::Bill};
use viyaabhaaram_app::{
    billing::CheckoutOutcome,
    domain::items::models::ItemUuid,
    session::SessionError,
};

use crate::cli::{
    args::{ConnectionArgs, LoginArgs, start_session},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct BillArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// Item to bill; repeat once per unit sold
    #[arg(long = "item", required = true)]
    items: Vec<Uuid>,
}

pub(crate) async fn run(args: BillArgs) -> Result<(), String> {
    let (context, mut session) = start_session(&args.connection, args.login).await?;

    for item in args.items {
        match session.add_to_cart(ItemUuid::from_uuid(item)) {
            Ok(_qty) => {}
            Err(SessionError::Cart(CartError::StockExceeded { stock, .. })) => {
                println!("stock limit reached for {item} ({stock} in stock), skipping");
            }
            Err(error) => return Err(format!("failed to add {item} to cart: {error}")),
        }
    }

    let bill =
        Bill::from_cart(session.cart()).map_err(|error| format!("failed to price bill: {error}"))?;

    if bill.is_empty() {
        println!("nothing to bill");
        return Ok(());
    }

    bill.write_to(io::stdout())
        .map_err(|error| format!("failed to print bill: {error}"))?;

    let outcome = context
        .billing
        .checkout(&mut session)
        .await
        .map_err(|error| format!("failed to check out: {error}"))?;

    if let Some(transaction) = outcome.transaction() {
        println!("transaction_uuid: {}", transaction.uuid);
        println!("amount: {}", output::money(transaction.amount, context.currency));
    }

    if let Some(report) = outcome.report() {
        for short in report.shortfalls() {
            println!(
                "{} sold {} beyond recorded stock",
                short.adjustment.name,
                short.shortfall()
            );
        }

        for drifted in report.drifted() {
            println!(
                "{} stock was {} in the store, expected {} after sale, now {}",
                drifted.adjustment.name,
                drifted.previous_stock,
                drifted.adjustment.expected_stock,
                drifted.stock
            );
        }
    }

    if matches!(outcome, CheckoutOutcome::PartiallyReconciled { .. }) {
        println!(
            "{} stock update(s) failed, retrying once",
            session.pending().len()
        );

        let retry = context.billing.retry_pending(&mut session).await;

        println!("applied on retry: {}", retry.applied().len());
    }

    let account = session.account().uuid;

    match session
        .catalog_mut()
        .refresh(context.items.as_ref(), account)
        .await
    {
        Ok(discrepancies) => {
            for discrepancy in discrepancies {
                println!(
                    "{} stock differs: expected {}, store has {}",
                    discrepancy.name,
                    discrepancy
                        .local
                        .map_or_else(|| "none".to_string(), |stock| stock.to_string()),
                    discrepancy
                        .store
                        .map_or_else(|| "none".to_string(), |stock| stock.to_string()),
                );
            }
        }
        Err(error) => println!("could not refresh catalog: {error}"),
    }

    let unapplied = session.end();

    for pending in &unapplied {
        println!(
            "stock for {} still needs -{} ({} attempt(s)): {}",
            pending.adjustment.name, pending.adjustment.qty, pending.attempts, pending.reason
        );
    }

    if unapplied.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "sale recorded but {} stock update(s) were not applied",
            unapplied.len()
        ))
    }
}
