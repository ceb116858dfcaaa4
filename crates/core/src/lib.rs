//! Viyaabhaaram
//!
//! Viyaabhaaram is the billing core of a small-shop point of sale: a cart that
//! never sells more than the stock it knows about, exact money arithmetic in
//! minor units, printable bills, and the bookkeeping needed to reconcile stock
//! after a sale has been recorded.

pub mod cart;
pub mod items;
pub mod pricing;
pub mod receipt;
pub mod reconciliation;

#[cfg(test)]
mod fixtures;
