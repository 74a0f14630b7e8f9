//! Persistence store abstraction
//!
//! Services receive an `Arc<dyn InventoryStore>` instead of reaching for a
//! global connection. `SqliteStore` is the durable implementation;
//! `MemoryStore` is an in-process double with the same referential rules.
//!
//! The movement log is append-only: there is no operation to update or
//! delete a single movement.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::AppResult;
use crate::models::{Item, Movement, NewItem, NewMovement, NewParty, Party, PartyType, RecentTransaction};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Store handle shared by the application state and services
pub type SharedStore = Arc<dyn InventoryStore>;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Insert an item; it starts active
    async fn insert_item(&self, item: NewItem) -> AppResult<Item>;

    /// Get an item by ID
    async fn get_item(&self, id: i64) -> AppResult<Option<Item>>;

    /// List items ordered by name
    async fn list_items(&self, active_only: bool) -> AppResult<Vec<Item>>;

    /// Set whichever prices are given; `None` keeps the stored value.
    /// Returns `None` when the item does not exist.
    async fn update_item_prices(
        &self,
        id: i64,
        cost_price: Option<Decimal>,
        sale_price: Option<Decimal>,
    ) -> AppResult<Option<Item>>;

    /// Physically delete an item, cascading to its movements
    async fn delete_item(&self, id: i64) -> AppResult<bool>;

    /// Exact lookup on (type, name)
    async fn find_party(&self, party_type: PartyType, name: &str) -> AppResult<Option<Party>>;

    async fn insert_party(&self, party: NewParty) -> AppResult<Party>;

    /// Parties of one type ordered by name
    async fn list_parties(&self, party_type: PartyType) -> AppResult<Vec<Party>>;

    /// Delete a party; movements keep their rows with the party cleared
    async fn delete_party(&self, id: i64) -> AppResult<bool>;

    /// Append one movement, assigning identity and creation time
    async fn append_movement(&self, movement: NewMovement) -> AppResult<Movement>;

    /// Movements in insertion order, optionally for one item only
    async fn list_movements(&self, item_id: Option<i64>) -> AppResult<Vec<Movement>>;

    /// Newest-created movements first, joined with item and party names
    async fn recent_movements(&self, limit: u32) -> AppResult<Vec<RecentTransaction>>;

    /// Liveness check for the health endpoint
    async fn ping(&self) -> AppResult<()>;
}
