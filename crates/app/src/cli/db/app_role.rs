use clap::Args;
use sqlx::{query, query_as};
use viyaabhaaram_app::database;

/// Tables the app role reads and writes. Items and transactions are guarded
/// by row-level security, so the role must not be able to bypass it.
const APP_TABLES: &str = "accounts, items, transactions, stock_movements";

#[derive(Debug, Args)]
pub(crate) struct AppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role name
    #[arg(long, default_value = "viyaabhaaram_app")]
    role: String,

    /// Role password
    #[arg(long, env = "VIYAABHAARAM_APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: AppRoleArgs) -> Result<(), String> {
    if args.role.trim().is_empty() {
        return Err("role cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    // Identifiers cannot be bound, so let the server quote them.
    let (role, password, database, exists): (String, String, String, bool) = query_as(
        "SELECT quote_ident($1), quote_literal($2), quote_ident(current_database()), \
                EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)",
    )
    .bind(&args.role)
    .bind(&args.password)
    .fetch_one(&mut *tx)
    .await
    .map_err(|error| format!("failed to quote role: {error}"))?;

    let verb = if exists { "ALTER" } else { "CREATE" };

    let statements = [
        format!(
            "{verb} ROLE {role} LOGIN PASSWORD {password} \
             NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS"
        ),
        format!("GRANT CONNECT ON DATABASE {database} TO {role}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON {APP_TABLES} TO {role}"),
    ];

    for statement in &statements {
        query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to configure role {}: {error}", args.role))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit role changes: {error}"))?;

    println!("role: {}", args.role);
    println!("created: {}", !exists);
    println!("granted: {APP_TABLES}");

    Ok(())
}
