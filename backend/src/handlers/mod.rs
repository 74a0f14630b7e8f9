//! HTTP handlers for the Stockroom API

pub mod health;
pub mod items;
pub mod parties;
pub mod reporting;
pub mod stock;

pub use health::*;
pub use items::*;
pub use parties::*;
pub use reporting::*;
pub use stock::*;
