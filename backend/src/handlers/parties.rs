//! HTTP handlers for the supplier and customer screen

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{CreatePartyInput, Party, PartyType};
use crate::services::DirectoryService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PartyListQuery {
    #[serde(rename = "type")]
    pub party_type: PartyType,
}

/// List suppliers or customers
pub async fn list_parties(
    State(state): State<AppState>,
    Query(query): Query<PartyListQuery>,
) -> AppResult<Json<Vec<Party>>> {
    let service = DirectoryService::new(state.store);
    let parties = service.list_parties(query.party_type).await?;
    Ok(Json(parties))
}

/// Add a supplier or customer. An existing party with the same name is returned as is.
pub async fn create_party(
    State(state): State<AppState>,
    Json(input): Json<CreatePartyInput>,
) -> AppResult<Json<Party>> {
    let service = DirectoryService::new(state.store);
    let party = service.add_party(input).await?;
    Ok(Json(party))
}
