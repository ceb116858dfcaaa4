use clap::Args;
use viyaabhaaram_app::domain::accounts::models::NewAccount;

use crate::cli::args::ConnectionArgs;

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Account email address
    #[arg(long)]
    email: String,

    /// Account mobile number
    #[arg(long)]
    mobile: String,

    /// Business display name
    #[arg(long)]
    business_name: String,

    /// Account password
    #[arg(long, env = "VIYAABHAARAM_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: RegisterArgs) -> Result<(), String> {
    let context = args.connection.context().await?;

    let account = context
        .accounts
        .register(NewAccount {
            email: args.email,
            mobile: args.mobile,
            business_name: args.business_name,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to register account: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("business_name: {}", account.business_name);
    println!("email: {}", account.email);
    println!("mobile: {}", account.mobile);

    Ok(())
}
