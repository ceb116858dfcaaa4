use clap::Args;
use viyaabhaaram_app::domain::accounts::models::Credentials;

use crate::cli::args::{ConnectionArgs, LoginArgs};

#[derive(Debug, Args)]
pub(crate) struct UpdatePasswordArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    login: LoginArgs,

    /// Replacement password
    #[arg(long, env = "VIYAABHAARAM_NEW_PASSWORD", hide_env_values = true)]
    new_password: String,
}

pub(crate) async fn run(args: UpdatePasswordArgs) -> Result<(), String> {
    let context = args.connection.context().await?;

    let account = context
        .accounts
        .login(Credentials {
            login: args.login.login,
            password: args.login.password.clone(),
        })
        .await
        .map_err(|error| format!("failed to log in: {error}"))?;

    context
        .accounts
        .update_credential(account.uuid, args.login.password, args.new_password)
        .await
        .map_err(|error| format!("failed to update password: {error}"))?;

    println!("password updated for {}", account.email);

    Ok(())
}
