//! Shared types and models for the Stockroom inventory tracker
//!
//! This crate contains the domain models and the stock ledger computation
//! shared between the backend service and the browser (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
