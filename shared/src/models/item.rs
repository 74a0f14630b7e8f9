//! Item catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{clean_optional_text, validate_item_name, validate_price};

/// Unit of measure used when none is given
pub const DEFAULT_UNIT: &str = "pcs";

/// Category labels offered by the item form. Category stays free text.
pub const ITEM_CATEGORIES: [&str; 13] = [
    "Screen",
    "Battery",
    "Charger",
    "Cable",
    "Speaker",
    "Mic",
    "Tempered Glass",
    "Cover",
    "Back Panel",
    "Charging Port",
    "Tool",
    "Adhesive/Consumable",
    "Other",
];

/// An item master record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: String,
    /// Default cost price, used to value stock
    pub cost_price: Decimal,
    /// Default sale price
    pub sale_price: Decimal,
    /// Soft-delete flag; inactive items drop out of listings
    pub active: bool,
    pub notes: Option<String>,
}

/// Input for creating an item
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateItemInput {
    #[validate(length(max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 100))]
    pub brand: Option<String>,
    #[validate(length(max = 20))]
    pub unit: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// A validated, trimmed item ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: String,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub notes: Option<String>,
}

impl CreateItemInput {
    /// Trim text fields, apply defaults and check the required name and price bounds.
    ///
    /// Returns the offending field name alongside the message on failure.
    pub fn normalize(&self, default_unit: &str) -> Result<NewItem, (&'static str, &'static str)> {
        let name = self.name.trim();
        validate_item_name(name).map_err(|e| ("name", e))?;

        let cost_price = self.cost_price.unwrap_or(Decimal::ZERO);
        validate_price(cost_price).map_err(|e| ("cost_price", e))?;
        let sale_price = self.sale_price.unwrap_or(Decimal::ZERO);
        validate_price(sale_price).map_err(|e| ("sale_price", e))?;

        Ok(NewItem {
            name: name.to_string(),
            category: clean_optional_text(self.category.as_deref()),
            brand: clean_optional_text(self.brand.as_deref()),
            unit: clean_optional_text(self.unit.as_deref())
                .unwrap_or_else(|| default_unit.to_string()),
            cost_price,
            sale_price,
            notes: clean_optional_text(self.notes.as_deref()),
        })
    }
}

/// Partial price update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemPricesInput {
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
}

impl UpdateItemPricesInput {
    /// Apply the update on top of an item, keeping unspecified prices
    pub fn apply_to(&self, item: &Item) -> Item {
        Item {
            cost_price: self.cost_price.unwrap_or(item.cost_price),
            sale_price: self.sale_price.unwrap_or(item.sale_price),
            ..item.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cost_price.is_none() && self.sale_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: 1,
            name: "iPhone 11 Screen".to_string(),
            category: Some("Screen".to_string()),
            brand: Some("Apple".to_string()),
            unit: "pcs".to_string(),
            cost_price: Decimal::from(100),
            sale_price: Decimal::from(150),
            active: true,
            notes: None,
        }
    }

    #[test]
    fn test_normalize_trims_and_defaults() {
        let input = CreateItemInput {
            name: "  Type-C Cable ".to_string(),
            category: Some("Cable".to_string()),
            brand: Some("   ".to_string()),
            unit: Some("".to_string()),
            notes: Some(" fast charge ".to_string()),
            ..Default::default()
        };

        let new_item = input.normalize(DEFAULT_UNIT).unwrap();
        assert_eq!(new_item.name, "Type-C Cable");
        assert_eq!(new_item.brand, None);
        assert_eq!(new_item.unit, "pcs");
        assert_eq!(new_item.notes.as_deref(), Some("fast charge"));
        assert_eq!(new_item.cost_price, Decimal::ZERO);
        assert_eq!(new_item.sale_price, Decimal::ZERO);
    }

    #[test]
    fn test_normalize_rejects_blank_name() {
        let input = CreateItemInput {
            name: "   ".to_string(),
            ..Default::default()
        };
        let err = input.normalize(DEFAULT_UNIT).unwrap_err();
        assert_eq!(err.0, "name");
    }

    #[test]
    fn test_normalize_rejects_negative_price() {
        let input = CreateItemInput {
            name: "Battery".to_string(),
            sale_price: Some(Decimal::from(-5)),
            ..Default::default()
        };
        let err = input.normalize(DEFAULT_UNIT).unwrap_err();
        assert_eq!(err.0, "sale_price");
    }

    #[test]
    fn test_price_update_keeps_omitted_fields() {
        let update = UpdateItemPricesInput {
            cost_price: Some(Decimal::from(120)),
            sale_price: None,
        };
        let updated = update.apply_to(&item());
        assert_eq!(updated.cost_price, Decimal::from(120));
        assert_eq!(updated.sale_price, Decimal::from(150));
        assert!(!update.is_empty());
        assert!(UpdateItemPricesInput::default().is_empty());
    }

    #[test]
    fn test_length_bounds() {
        let input = CreateItemInput {
            name: "x".repeat(201),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
