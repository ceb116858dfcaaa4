//! Items

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::ItemsServiceError;
pub use service::*;
