//! Domain models for the Stockroom server
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
pub use shared::types::*;
