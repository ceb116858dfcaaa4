use clap::{Args, Subcommand};

mod register;
mod update_password;

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// Register a new merchant account
    Register(register::RegisterArgs),

    /// Change an account's password
    UpdatePassword(update_password::UpdatePasswordArgs),
}

pub(crate) async fn run(command: AccountCommand) -> Result<(), String> {
    match command.command {
        AccountSubcommand::Register(args) => register::run(args).await,
        AccountSubcommand::UpdatePassword(args) => update_password::run(args).await,
    }
}
