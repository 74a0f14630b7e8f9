//! Domain models for the Stockroom inventory tracker

mod inventory;
mod item;
mod movement;
mod party;
mod stock;

pub use inventory::*;
pub use item::*;
pub use movement::*;
pub use party::*;
pub use stock::*;
