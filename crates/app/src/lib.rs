//! Viyaabhaaram application layer: persistence, sessions and checkout.

pub mod billing;
pub mod catalog;
pub mod context;
pub mod database;
pub mod domain;
pub mod session;

#[cfg(test)]
mod test;

mod uuids;
