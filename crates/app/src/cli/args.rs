//! Arguments shared by subcommands that work inside an account.

use clap::Args;
use viyaabhaaram_app::{
    context::{AppContext, DEFAULT_CURRENCY},
    domain::accounts::models::Credentials,
    session::Session,
};

#[derive(Debug, Args)]
pub(crate) struct ConnectionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: String,

    /// ISO 4217 code prices are kept in
    #[arg(long, env = "VIYAABHAARAM_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub(crate) currency: String,
}

impl ConnectionArgs {
    pub(crate) async fn context(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url, &self.currency)
            .await
            .map_err(|error| format!("failed to initialise app context: {error}"))
    }
}

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email address or mobile number
    #[arg(long, env = "VIYAABHAARAM_LOGIN")]
    pub(crate) login: String,

    /// Account password
    #[arg(long, env = "VIYAABHAARAM_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

/// Connect, authenticate and load the account's catalog.
pub(crate) async fn start_session(
    connection: &ConnectionArgs,
    login: LoginArgs,
) -> Result<(AppContext, Session), String> {
    let context = connection.context().await?;

    let account = context
        .accounts
        .login(Credentials {
            login: login.login,
            password: login.password,
        })
        .await
        .map_err(|error| format!("failed to log in: {error}"))?;

    let session = Session::start(account, context.currency, context.items.as_ref())
        .await
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    Ok((context, session))
}
