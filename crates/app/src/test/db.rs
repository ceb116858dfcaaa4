//! Database test utilities and shared infrastructure

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

pub(super) const SUPERUSER: &str = "viyaabhaaram_test";
pub(super) const SUPERUSER_PASSWORD: &str = "viyaabhaaram_test_password";

/// Database names are interpolated into DDL, so only plain identifiers are allowed.
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err("database name must be 1-63 characters long".to_string());
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Err("database name must start with a letter or underscore".to_string());
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("database name can only contain letters, digits and underscores".to_string());
    }

    Ok(())
}

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(SUPERUSER)
        .with_password(SUPERUSER_PASSWORD)
        .with_db_name(SUPERUSER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// One container per test binary, shared by every test database.
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = drop_database(&db_name).await {
                eprintln!("Failed to drop test database '{db_name}': {err}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{SUPERUSER}:{SUPERUSER_PASSWORD}@{host}:{port}/{database}")
}

async fn drop_database(db_name: &str) -> Result<(), sqlx::Error> {
    if POSTGRES_CONTAINER.get().is_none() || validate_database_name(db_name).is_err() {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&server_url("postgres").await).await?;

    query(&format!("DROP DATABASE IF EXISTS \"{db_name}\""))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A uniquely named, fully migrated database inside the shared container.
///
/// Every test gets its own database, so services commit normally and no
/// rollback is needed between tests. The database is dropped in the
/// background once the `TestDb` goes out of scope.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,

    /// URL `pool` was connected with, as the container superuser.
    pub(super) superuser_url: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let thread_id = format!("{:?}", std::thread::current().id())
            .replace(|c: char| !c.is_ascii_alphanumeric(), "");

        Self::new_with_db_name(&format!("viyaabhaaram_test_{nanos}_{thread_id}")).await
    }

    pub async fn new_with_db_name(db_name: &str) -> Self {
        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        if let Err(error) = validate_database_name(db_name) {
            panic!("Invalid database name '{db_name}': {error}");
        }

        let mut conn = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        query(&format!("CREATE DATABASE \"{db_name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let database_url = server_url(db_name).await;

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to create pool for database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self {
            pool,
            name: db_name.to_string(),
            superuser_url: database_url,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_database_name_accepts_identifiers() {
        assert!(validate_database_name("valid_name").is_ok());
        assert!(validate_database_name("_underscore_start").is_ok());
        assert!(validate_database_name("viyaabhaaram_test_123").is_ok());
    }

    #[test]
    fn validate_database_name_rejects_bad_names() {
        let too_long = "a".repeat(64);

        for name in ["", too_long.as_str(), "123start", "has-hyphen", "has space", "quote\""] {
            assert!(
                validate_database_name(name).is_err(),
                "expected {name:?} to be rejected"
            );
        }
    }

    #[tokio::test]
    async fn migrated_database_has_tables() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_name IN ('accounts', 'items', 'transactions')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to count tables");

        assert_eq!(tables, 3);
    }
}
