use clap::Args;
use uuid::Uuid;
use viyaabhaaram_app::domain::items::models::ItemUuid;

use crate::cli::args::{ConnectionArgs, LoginArgs, start_session};

#[derive(Debug, Args)]
pub(crate) struct SetStockArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// UUID of the item to update
    #[arg(long)]
    item: Uuid,

    /// New stock level
    #[arg(long)]
    stock: u32,
}

pub(crate) async fn run(args: SetStockArgs) -> Result<(), String> {
    let (context, mut session) = start_session(&args.connection, args.login).await?;

    let item = session
        .set_stock(context.items.as_ref(), ItemUuid::from_uuid(args.item), args.stock)
        .await
        .map_err(|error| format!("failed to set stock: {error}"))?;

    println!("{}: {} in stock", item.name, item.stock);

    Ok(())
}
