//! In-memory store used by tests and demos

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::InventoryStore;
use crate::error::{AppError, AppResult};
use crate::models::{
    newest_first, next_created_at, Item, Movement, NewItem, NewMovement, NewParty, Party, PartyType,
    RecentTransaction,
};

#[derive(Default)]
struct State {
    items: Vec<Item>,
    parties: Vec<Party>,
    movements: Vec<Movement>,
    next_item_id: i64,
    next_party_id: i64,
    next_movement_id: i64,
    newest_created_at: Option<DateTime<Utc>>,
}

/// Vector-backed store with the same referential actions as the SQLite schema
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn insert_item(&self, item: NewItem) -> AppResult<Item> {
        let mut state = self.state.write().await;
        let item = Item {
            id: next_id(&mut state.next_item_id),
            name: item.name,
            category: item.category,
            brand: item.brand,
            unit: item.unit,
            cost_price: item.cost_price,
            sale_price: item.sale_price,
            active: true,
            notes: item.notes,
        };
        state.items.push(item.clone());
        Ok(item)
    }

    async fn get_item(&self, id: i64) -> AppResult<Option<Item>> {
        let state = self.state.read().await;
        Ok(state.items.iter().find(|i| i.id == id).cloned())
    }

    async fn list_items(&self, active_only: bool) -> AppResult<Vec<Item>> {
        let state = self.state.read().await;
        let mut items: Vec<Item> = state
            .items
            .iter()
            .filter(|i| !active_only || i.active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn update_item_prices(
        &self,
        id: i64,
        cost_price: Option<Decimal>,
        sale_price: Option<Decimal>,
    ) -> AppResult<Option<Item>> {
        let mut state = self.state.write().await;
        let Some(item) = state.items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        if let Some(cost_price) = cost_price {
            item.cost_price = cost_price;
        }
        if let Some(sale_price) = sale_price {
            item.sale_price = sale_price;
        }
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Ok(false);
        }
        state.movements.retain(|m| m.item_id != id);
        Ok(true)
    }

    async fn find_party(&self, party_type: PartyType, name: &str) -> AppResult<Option<Party>> {
        let state = self.state.read().await;
        Ok(state
            .parties
            .iter()
            .find(|p| p.party_type == party_type && p.name == name)
            .cloned())
    }

    async fn insert_party(&self, party: NewParty) -> AppResult<Party> {
        let mut state = self.state.write().await;
        if state
            .parties
            .iter()
            .any(|p| p.party_type == party.party_type && p.name == party.name)
        {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }
        let party = Party {
            id: next_id(&mut state.next_party_id),
            party_type: party.party_type,
            name: party.name,
            phone: party.phone,
            address: party.address,
        };
        state.parties.push(party.clone());
        Ok(party)
    }

    async fn list_parties(&self, party_type: PartyType) -> AppResult<Vec<Party>> {
        let state = self.state.read().await;
        let mut parties: Vec<Party> = state
            .parties
            .iter()
            .filter(|p| p.party_type == party_type)
            .cloned()
            .collect();
        parties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(parties)
    }

    async fn delete_party(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.parties.len();
        state.parties.retain(|p| p.id != id);
        if state.parties.len() == before {
            return Ok(false);
        }
        for movement in state.movements.iter_mut().filter(|m| m.party_id == Some(id)) {
            movement.party_id = None;
        }
        Ok(true)
    }

    async fn append_movement(&self, movement: NewMovement) -> AppResult<Movement> {
        let mut state = self.state.write().await;
        if !state.items.iter().any(|i| i.id == movement.item_id) {
            return Err(AppError::Referential("item".to_string()));
        }
        if let Some(party_id) = movement.party_id {
            if !state.parties.iter().any(|p| p.id == party_id) {
                return Err(AppError::Referential("party".to_string()));
            }
        }
        if movement.quantity <= Decimal::ZERO {
            return Err(AppError::validation("quantity", "Quantity must be greater than zero"));
        }

        let created_at = next_created_at(Utc::now(), state.newest_created_at);
        state.newest_created_at = Some(created_at);

        let movement = Movement {
            id: next_id(&mut state.next_movement_id),
            item_id: movement.item_id,
            movement_type: movement.movement_type,
            quantity: movement.quantity,
            unit_price: movement.unit_price,
            party_id: movement.party_id,
            ref_no: movement.ref_no,
            txn_date: movement.txn_date,
            remarks: movement.remarks,
            created_at,
        };
        state.movements.push(movement.clone());
        Ok(movement)
    }

    async fn list_movements(&self, item_id: Option<i64>) -> AppResult<Vec<Movement>> {
        let state = self.state.read().await;
        Ok(state
            .movements
            .iter()
            .filter(|m| item_id.map_or(true, |id| m.item_id == id))
            .cloned()
            .collect())
    }

    async fn recent_movements(&self, limit: u32) -> AppResult<Vec<RecentTransaction>> {
        let state = self.state.read().await;
        let mut movements: Vec<&Movement> = state.movements.iter().collect();
        movements.sort_by(|a, b| newest_first(a.created_at, a.id, b.created_at, b.id));

        let rows = movements
            .into_iter()
            .filter_map(|m| {
                let item = state.items.iter().find(|i| i.id == m.item_id)?;
                let party = m
                    .party_id
                    .and_then(|pid| state.parties.iter().find(|p| p.id == pid))
                    .map(|p| p.name.clone());
                Some(RecentTransaction {
                    id: m.id,
                    txn_date: m.txn_date,
                    txn_type: m.movement_type,
                    item: item.name.clone(),
                    qty: m.quantity,
                    unit_price: m.unit_price,
                    party,
                    ref_no: m.ref_no.clone(),
                    remarks: m.remarks.clone(),
                    created_at: m.created_at,
                })
            })
            .take(limit as usize)
            .collect();
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
