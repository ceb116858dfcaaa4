use clap::Args;
use uuid::Uuid;
use viyaabhaaram_app::domain::items::models::ItemUuid;

use crate::cli::args::{ConnectionArgs, LoginArgs, start_session};

#[derive(Debug, Args)]
pub(crate) struct DeleteItemArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// UUID of the item to delete
    #[arg(long)]
    item: Uuid,
}

pub(crate) async fn run(args: DeleteItemArgs) -> Result<(), String> {
    let (context, mut session) = start_session(&args.connection, args.login).await?;

    session
        .delete_item(context.items.as_ref(), ItemUuid::from_uuid(args.item))
        .await
        .map_err(|error| format!("failed to delete item: {error}"))?;

    println!("deleted item {}", args.item);

    Ok(())
}
