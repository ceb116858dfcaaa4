use clap::Args;
use viyaabhaaram_app::domain::items::models::{NewItem, parse_price};

use crate::cli::{
    args::{ConnectionArgs, LoginArgs, start_session},
    output,
};

#[derive(Debug, Args)]
pub(crate) struct AddItemArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// Item name
    #[arg(long)]
    name: String,

    /// Unit price in major units, e.g. `49.50`
    #[arg(long)]
    price: String,

    /// Opening stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Category; `General` when omitted
    #[arg(long)]
    category: Option<String>,

    /// Available size, may be repeated
    #[arg(long = "size")]
    sizes: Vec<String>,

    /// Available colour, may be repeated
    #[arg(long = "color")]
    colors: Vec<String>,

    #[arg(long)]
    description: Option<String>,

    /// Encoded image payload
    #[arg(long)]
    image: Option<String>,
}

pub(crate) async fn run(args: AddItemArgs) -> Result<(), String> {
    let (context, mut session) = start_session(&args.connection, args.login).await?;

    let price = parse_price(&args.price, context.currency)
        .map_err(|error| format!("invalid price {:?}: {error}", args.price))?;

    let mut item = NewItem::new(args.name, price, args.stock);

    item.category = args.category;
    item.sizes = args.sizes;
    item.colors = args.colors;
    item.description = args.description;
    item.image = args.image;

    let created = session
        .add_item(context.items.as_ref(), item)
        .await
        .map_err(|error| format!("failed to add item: {error}"))?;

    println!("item_uuid: {}", created.uuid);
    println!("name: {}", created.name);
    println!("category: {}", created.category);
    println!("price: {}", output::money(created.price, context.currency));
    println!("stock: {}", created.stock);

    Ok(())
}
