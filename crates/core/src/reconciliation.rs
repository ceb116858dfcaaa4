//! Stock reconciliation
//!
//! A sale is durable once its transaction is stored. Stock changes that follow
//! are applied one item at a time and any of them may fail, so each checkout
//! produces a [`ReconciliationReport`] describing which adjustments landed and
//! which are still pending.

use uuid::Uuid;

/// Stock change required by one sold cart line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockAdjustment {
    /// Item whose stock must be decremented.
    pub item: Uuid,

    /// Item name, kept for reporting.
    pub name: String,

    /// Units sold.
    pub qty: u32,

    /// Stock expected after the decrement, from the stock known at sale time.
    pub expected_stock: u32,
}

/// An adjustment the store confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedAdjustment {
    /// The adjustment that was applied.
    pub adjustment: StockAdjustment,

    /// Store stock immediately before the decrement.
    pub previous_stock: u32,

    /// Store stock after the decrement.
    pub stock: u32,
}

impl AppliedAdjustment {
    /// Units sold that the store did not have. Stock is floored at zero, so
    /// these units were sold without being on hand.
    pub fn shortfall(&self) -> u32 {
        self.adjustment.qty.saturating_sub(self.previous_stock)
    }

    /// True when the resulting stock differs from the one expected at sale
    /// time, i.e. the store changed underneath the session.
    pub fn drifted(&self) -> bool {
        self.stock != self.adjustment.expected_stock
    }
}

/// An adjustment that could not be applied and must be retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAdjustment {
    /// Sale transaction the adjustment belongs to.
    pub sale: Uuid,

    /// The adjustment still to apply.
    pub adjustment: StockAdjustment,

    /// Why the last attempt failed.
    pub reason: String,

    /// Number of attempts made so far.
    pub attempts: u32,
}

/// Outcome of applying a set of stock adjustments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    applied: Vec<AppliedAdjustment>,
    pending: Vec<PendingAdjustment>,
}

impl ReconciliationReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmed adjustment.
    pub fn record_applied(&mut self, applied: AppliedAdjustment) {
        self.applied.push(applied);
    }

    /// Record a failed adjustment.
    pub fn record_pending(&mut self, pending: PendingAdjustment) {
        self.pending.push(pending);
    }

    /// Adjustments the store confirmed.
    pub fn applied(&self) -> &[AppliedAdjustment] {
        &self.applied
    }

    /// Adjustments that failed.
    pub fn pending(&self) -> &[PendingAdjustment] {
        &self.pending
    }

    /// Confirmed adjustments that sold more than the store had on hand.
    pub fn shortfalls(&self) -> impl Iterator<Item = &AppliedAdjustment> {
        self.applied
            .iter()
            .filter(|applied| applied.shortfall() > 0)
    }

    /// Confirmed adjustments whose resulting stock differs from the stock
    /// expected at sale time.
    pub fn drifted(&self) -> impl Iterator<Item = &AppliedAdjustment> {
        self.applied.iter().filter(|applied| applied.drifted())
    }

    /// True when every adjustment was applied.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Consume the report, returning the pending adjustments.
    pub fn into_pending(self) -> Vec<PendingAdjustment> {
        self.pending
    }
}
