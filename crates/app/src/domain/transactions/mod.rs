//! Transactions

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::TransactionsServiceError;
pub use service::*;
