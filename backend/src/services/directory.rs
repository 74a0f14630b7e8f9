//! Party directory: suppliers and customers looked up by name

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CreatePartyInput, NewParty, Party, PartyType};
use crate::store::SharedStore;

/// Directory service for suppliers and customers
#[derive(Clone)]
pub struct DirectoryService {
    store: SharedStore,
}

impl DirectoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Return the party with this type and trimmed name, creating it if absent.
    ///
    /// An existing match is returned unchanged even when `phone` or `address`
    /// differ. A blank name yields `Ok(None)`.
    pub async fn find_or_create(
        &self,
        party_type: PartyType,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> AppResult<Option<Party>> {
        let Some(new_party) = NewParty::from_form(party_type, name, phone, address) else {
            return Ok(None);
        };

        if let Some(existing) = self.store.find_party(party_type, &new_party.name).await? {
            return Ok(Some(existing));
        }

        let party = self.store.insert_party(new_party).await?;
        tracing::info!(party_id = party.id, party_type = party_type.as_str(), name = %party.name, "party created");
        Ok(Some(party))
    }

    /// Add a supplier or customer from the party screen; the name is required here
    pub async fn add_party(&self, input: CreatePartyInput) -> AppResult<Party> {
        input.validate()?;
        shared::validate_party_name(&input.name).map_err(|e| AppError::validation("name", e))?;

        self.find_or_create(
            input.party_type,
            &input.name,
            input.phone.as_deref(),
            input.address.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::validation("name", "Name is required"))
    }

    /// List parties of one type ordered by name
    pub async fn list_parties(&self, party_type: PartyType) -> AppResult<Vec<Party>> {
        self.store.list_parties(party_type).await
    }
}
