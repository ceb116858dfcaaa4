use clap::{Args, Subcommand};

mod add;
mod delete;
mod list;
mod set_stock;

#[derive(Debug, Args)]
pub(crate) struct ItemCommand {
    #[command(subcommand)]
    command: ItemSubcommand,
}

#[derive(Debug, Subcommand)]
enum ItemSubcommand {
    /// Add an item to the catalog
    Add(add::AddItemArgs),

    /// List catalog items, newest first
    List(list::ListItemsArgs),

    /// Delete an item
    Delete(delete::DeleteItemArgs),

    /// Overwrite an item's stock
    SetStock(set_stock::SetStockArgs),
}

pub(crate) async fn run(command: ItemCommand) -> Result<(), String> {
    match command.command {
        ItemSubcommand::Add(args) => add::run(args).await,
        ItemSubcommand::List(args) => list::run(args).await,
        ItemSubcommand::Delete(args) => delete::run(args).await,
        ItemSubcommand::SetStock(args) => set_stock::run(args).await,
    }
}
