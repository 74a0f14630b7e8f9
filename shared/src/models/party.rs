//! Supplier and customer models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::clean_optional_text;

/// Kind of party. Suppliers and customers are separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Supplier,
    Customer,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyType::Supplier => "supplier",
            PartyType::Customer => "customer",
        }
    }
}

impl std::fmt::Display for PartyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartyType::Supplier => write!(f, "Supplier"),
            PartyType::Customer => write!(f, "Customer"),
        }
    }
}

impl std::str::FromStr for PartyType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supplier" => Ok(PartyType::Supplier),
            "customer" => Ok(PartyType::Customer),
            _ => Err("Party type must be 'supplier' or 'customer'"),
        }
    }
}

/// A supplier or customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    #[serde(rename = "type")]
    pub party_type: PartyType,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for adding a supplier or customer from the party screen
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePartyInput {
    #[serde(rename = "type")]
    pub party_type: PartyType,
    #[validate(length(max = 200))]
    pub name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// A party row ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewParty {
    pub party_type: PartyType,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewParty {
    /// Build a party from raw form text. Returns `None` when the name is blank.
    pub fn from_form(
        party_type: PartyType,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            party_type,
            name: name.to_string(),
            phone: clean_optional_text(phone),
            address: clean_optional_text(address),
        })
    }
}
