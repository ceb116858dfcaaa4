//! Billing Engine
//!
//! Checkout turns the session cart into a stored sale and then brings item
//! stock in line with it:
//!
//! 1. price the cart and freeze its lines,
//! 2. store the sale transaction,
//! 3. decrement each sold item's stock concurrently,
//! 4. patch the session catalog with the stock the store reports,
//! 5. clear the cart.
//!
//! Step 2 is the durability boundary. A failure before it leaves the session
//! exactly as it was. After it the sale stands, and decrements that fail are
//! kept on the session as pending updates for [`BillingEngine::retry_pending`].

use std::{num::TryFromIntError, sync::Arc};

use futures::future::join_all;
use thiserror::Error;
use tracing::{error, info, warn};
use viyaabhaaram::{
    cart::CartError,
    reconciliation::{AppliedAdjustment, PendingAdjustment, ReconciliationReport, StockAdjustment},
};

use crate::{
    domain::{
        accounts::models::AccountUuid,
        items::{ItemsService, models::ItemUuid},
        transactions::{
            TransactionsService, TransactionsServiceError,
            models::{NewTransaction, Transaction, TransactionKind, TransactionUuid},
        },
    },
    session::Session,
};

#[derive(Debug, Error)]
pub enum BillingError {
    /// The cart could not be priced or snapshotted.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The cart total is not a storable amount.
    #[error("cart total out of range")]
    Amount(#[from] TryFromIntError),

    /// The sale could not be stored; nothing was changed.
    #[error("failed to record transaction")]
    Transaction(#[source] TransactionsServiceError),
}

/// Result of a checkout attempt.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing was stored.
    EmptyCart,

    /// The sale was stored and every stock decrement applied.
    Completed {
        transaction: Transaction,
        report: ReconciliationReport,
    },

    /// The sale was stored but some decrements failed and are pending.
    PartiallyReconciled {
        transaction: Transaction,
        report: ReconciliationReport,
    },
}

impl CheckoutOutcome {
    /// The stored transaction, if one was created.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            Self::EmptyCart => None,
            Self::Completed { transaction, .. } | Self::PartiallyReconciled { transaction, .. } => {
                Some(transaction)
            }
        }
    }

    /// The reconciliation report, if stock was touched.
    pub fn report(&self) -> Option<&ReconciliationReport> {
        match self {
            Self::EmptyCart => None,
            Self::Completed { report, .. } | Self::PartiallyReconciled { report, .. } => {
                Some(report)
            }
        }
    }
}

#[derive(Clone)]
pub struct BillingEngine {
    items: Arc<dyn ItemsService>,
    transactions: Arc<dyn TransactionsService>,
}

impl BillingEngine {
    #[must_use]
    pub fn new(
        items: Arc<dyn ItemsService>,
        transactions: Arc<dyn TransactionsService>,
    ) -> Self {
        Self {
            items,
            transactions,
        }
    }

    /// Sell the session's cart.
    ///
    /// # Errors
    ///
    /// Returns a [`BillingError`] only when nothing was stored. The cart and
    /// catalog are unchanged in that case.
    pub async fn checkout(&self, session: &mut Session) -> Result<CheckoutOutcome, BillingError> {
        if session.cart().is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let account = session.account().uuid;
        let amount = u64::try_from(session.cart().total()?.to_minor_units())?;
        let items_data = session.cart().snapshot()?;
        let adjustments = session.cart().stock_adjustments();

        let transaction = self
            .transactions
            .create_transaction(
                account,
                NewTransaction {
                    uuid: TransactionUuid::new(),
                    kind: TransactionKind::Sale,
                    amount,
                    items_data,
                },
            )
            .await
            .map_err(BillingError::Transaction)?;

        let sale = transaction.uuid;

        let report = self
            .apply(
                account,
                adjustments
                    .into_iter()
                    .map(|adjustment| (sale, adjustment, 0)),
            )
            .await;

        session.apply_report(&report);
        session.cart_mut().clear();

        if report.is_complete() {
            info!(
                account = %account,
                transaction = %transaction.uuid,
                amount = transaction.amount,
                lines = transaction.items_data.len(),
                "checkout completed"
            );

            Ok(CheckoutOutcome::Completed {
                transaction,
                report,
            })
        } else {
            warn!(
                account = %account,
                transaction = %transaction.uuid,
                pending = report.pending().len(),
                "checkout recorded with pending stock updates"
            );

            Ok(CheckoutOutcome::PartiallyReconciled {
                transaction,
                report,
            })
        }
    }

    /// Re-issue every pending stock update on the session.
    ///
    /// Updates that fail again stay pending with their attempt count raised.
    /// Each update is keyed by its sale, so one the store already applied is
    /// not applied twice.
    pub async fn retry_pending(&self, session: &mut Session) -> ReconciliationReport {
        let account = session.account().uuid;
        let pending = session.take_pending();

        let report = self
            .apply(
                account,
                pending
                    .into_iter()
                    .map(|pending| {
                        (
                            TransactionUuid::from_uuid(pending.sale),
                            pending.adjustment,
                            pending.attempts,
                        )
                    }),
            )
            .await;

        session.apply_report(&report);

        report
    }

    async fn apply(
        &self,
        account: AccountUuid,
        adjustments: impl IntoIterator<Item = (TransactionUuid, StockAdjustment, u32)>,
    ) -> ReconciliationReport {
        let results = join_all(adjustments.into_iter().map(|(sale, adjustment, attempts)| {
            let items = Arc::clone(&self.items);

            async move {
                let result = items
                    .decrement_stock(
                        account,
                        sale,
                        ItemUuid::from_uuid(adjustment.item),
                        adjustment.qty,
                    )
                    .await;

                (sale, adjustment, attempts, result)
            }
        }))
        .await;

        let mut report = ReconciliationReport::new();

        for (sale, adjustment, attempts, result) in results {
            match result {
                Ok(decrement) => {
                    let applied = AppliedAdjustment {
                        adjustment,
                        previous_stock: decrement.previous_stock,
                        stock: decrement.stock,
                    };

                    if applied.shortfall() > 0 {
                        warn!(
                            item = %applied.adjustment.item,
                            name = %applied.adjustment.name,
                            qty = applied.adjustment.qty,
                            previous_stock = applied.previous_stock,
                            shortfall = applied.shortfall(),
                            "sold more than the store had in stock"
                        );
                    }

                    if applied.drifted() {
                        warn!(
                            item = %applied.adjustment.item,
                            name = %applied.adjustment.name,
                            qty = applied.adjustment.qty,
                            expected_stock = applied.adjustment.expected_stock,
                            previous_stock = applied.previous_stock,
                            stock = applied.stock,
                            "store stock differed from session stock"
                        );
                    }

                    report.record_applied(applied);
                }
                Err(update_error) => {
                    error!(
                        item = %adjustment.item,
                        name = %adjustment.name,
                        qty = adjustment.qty,
                        error = %update_error,
                        "stock update failed"
                    );

                    report.record_pending(PendingAdjustment {
                        sale: sale.into_uuid(),
                        adjustment,
                        reason: update_error.to_string(),
                        attempts: attempts + 1,
                    });
                }
            }
        }

        report
    }
}
