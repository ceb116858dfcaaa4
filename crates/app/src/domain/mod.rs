//! Viyaabhaaram Domain Concerns

pub mod accounts;
pub mod items;
pub mod transactions;
