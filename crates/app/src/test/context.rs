//! Test context for service-level integration tests.

use sqlx::{Connection, PgConnection, PgPool, query};

use crate::{
    database::Db,
    domain::{
        accounts::{
            AccountsService, PgAccountsService,
            models::{Account, NewAccount},
        },
        items::PgItemsService,
        transactions::PgTransactionsService,
    },
};

use super::db::{SUPERUSER, SUPERUSER_PASSWORD, TestDb};

/// Non-superuser role the services connect as, so row-level security applies.
const APP_ROLE: &str = "viyaabhaaram_app_test";
const APP_ROLE_PASSWORD: &str = "viyaabhaaram_app_test_pass";

pub struct TestContext {
    pub db: TestDb,
    pub account: Account,
    pub accounts: PgAccountsService,
    pub items: PgItemsService,
    pub transactions: PgTransactionsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let app_pool = Self::setup_app_pool(&test_db).await;
        let db = Db::new(app_pool.clone());
        let accounts = PgAccountsService::new(app_pool);

        let account = accounts
            .register(NewAccount {
                email: "owner@example.com".to_string(),
                mobile: "9000000000".to_string(),
                business_name: "Test Store".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect("Failed to register default test account");

        Self {
            account,
            accounts,
            items: PgItemsService::new(db.clone()),
            transactions: PgTransactionsService::new(db),
            db: test_db,
        }
    }

    /// Register another account, e.g. for isolation tests.
    pub async fn create_account(&self, email: &str, mobile: &str) -> Account {
        self.accounts
            .register(NewAccount {
                email: email.to_string(),
                mobile: mobile.to_string(),
                business_name: "Other Store".to_string(),
                password: "secret".to_string(),
            })
            .await
            .expect("Failed to register test account")
    }

    /// Create the app role (once per server) and connect to the test database as it.
    async fn setup_app_pool(test_db: &TestDb) -> PgPool {
        let su_url = &test_db.superuser_url;

        let server_url = su_url.rsplit_once('/').map_or(su_url.as_str(), |x| x.0);
        let mut server_conn = PgConnection::connect(&format!("{server_url}/postgres"))
            .await
            .expect("Failed to connect to postgres database for role setup");

        // Parallel tests race to create the role; losing the race is fine.
        let create_result = query(&format!(
            "CREATE ROLE {APP_ROLE} WITH LOGIN PASSWORD '{APP_ROLE_PASSWORD}' \
               NOSUPERUSER NOCREATEDB NOCREATEROLE"
        ))
        .execute(&mut server_conn)
        .await;

        match create_result {
            Err(sqlx::Error::Database(ref e))
                if matches!(e.code().as_deref(), Some("42710" | "23505")) => {}
            other => {
                other.expect("Failed to create app role");
            }
        }

        query(&format!(
            "GRANT CONNECT ON DATABASE \"{}\" TO {APP_ROLE}",
            test_db.name
        ))
        .execute(&mut server_conn)
        .await
        .expect("Failed to grant CONNECT on test database");

        server_conn
            .close()
            .await
            .expect("Failed to close server connection");

        let mut db_conn = PgConnection::connect(su_url)
            .await
            .expect("Failed to connect to test database for privilege setup");

        for stmt in [
            format!("GRANT USAGE ON SCHEMA public TO {APP_ROLE}"),
            format!(
                "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {APP_ROLE}"
            ),
        ] {
            query(&stmt)
                .execute(&mut db_conn)
                .await
                .expect("Failed to grant table privileges to app role");
        }

        db_conn
            .close()
            .await
            .expect("Failed to close db connection");

        let app_url = su_url.replacen(
            &format!("{SUPERUSER}:{SUPERUSER_PASSWORD}"),
            &format!("{APP_ROLE}:{APP_ROLE_PASSWORD}"),
            1,
        );

        PgPool::connect(&app_url)
            .await
            .expect("Failed to create app pool")
    }
}
