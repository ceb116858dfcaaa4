//! App Context

use std::sync::Arc;

use rusty_money::iso::{self, Currency};
use sqlx::PgPool;
use thiserror::Error;

use crate::{
    billing::BillingEngine,
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        items::{ItemsService, PgItemsService},
        transactions::{PgTransactionsService, TransactionsService},
    },
};

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub items: Arc<dyn ItemsService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub billing: BillingEngine,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Build application context from a database URL and ISO currency code.
    ///
    /// # Errors
    ///
    /// Returns an error when the currency is unknown or the database connection fails.
    pub async fn from_database_url(url: &str, currency: &str) -> Result<Self, AppInitError> {
        let currency = find_currency(currency)?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_pool(pool, currency))
    }

    #[must_use]
    pub fn from_pool(pool: PgPool, currency: &'static Currency) -> Self {
        let db = Db::new(pool.clone());

        let items: Arc<dyn ItemsService> = Arc::new(PgItemsService::new(db.clone()));
        let transactions: Arc<dyn TransactionsService> = Arc::new(PgTransactionsService::new(db));

        Self {
            accounts: Arc::new(PgAccountsService::new(pool)),
            billing: BillingEngine::new(Arc::clone(&items), Arc::clone(&transactions)),
            items,
            transactions,
            currency,
        }
    }
}

/// Look up an ISO 4217 currency by code, ignoring case.
///
/// # Errors
///
/// Returns [`AppInitError::UnknownCurrency`] for unrecognised codes.
pub fn find_currency(code: &str) -> Result<&'static Currency, AppInitError> {
    iso::find(&code.trim().to_uppercase())
        .ok_or_else(|| AppInitError::UnknownCurrency(code.to_string()))
}
