use clap::Args;

use crate::cli::{
    args::{ConnectionArgs, LoginArgs, start_session},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct ListItemsArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// Only show items whose name contains this text
    #[arg(long)]
    search: Option<String>,
}

pub(crate) async fn run(args: ListItemsArgs) -> Result<(), String> {
    let (context, session) = start_session(&args.connection, args.login).await?;

    let catalog = session.catalog();

    let items: Vec<_> = match args.search.as_deref() {
        Some(term) => catalog.search(term).collect(),
        None => catalog.items().iter().collect(),
    };

    if items.is_empty() {
        println!("no items found");
        return Ok(());
    }

    println!("{}", output::items_table(items, context.currency));

    Ok(())
}
