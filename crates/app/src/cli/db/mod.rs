use clap::{Args, Subcommand};

mod app_role;
mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Create or update the login role the app connects as
    AppRole(app_role::AppRoleArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
        DbSubcommand::AppRole(args) => app_role::run(args).await,
    }
}
