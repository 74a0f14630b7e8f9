//! Stock movement (ledger entry) models

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Stock received (purchase)
    In,
    /// Stock issued or sold
    Out,
    /// Manual upward correction
    Adjust,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "IN",
            MovementType::Out => "OUT",
            MovementType::Adjust => "ADJUST",
        }
    }

    /// Effect of a stored (always positive) quantity on stock
    pub fn signed(&self, quantity: Decimal) -> Decimal {
        match self {
            MovementType::In | MovementType::Adjust => quantity,
            MovementType::Out => -quantity,
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(MovementType::In),
            "OUT" => Ok(MovementType::Out),
            "ADJUST" => Ok(MovementType::Adjust),
            _ => Err("Movement type must be IN, OUT or ADJUST"),
        }
    }
}

/// An immutable ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    pub item_id: i64,
    #[serde(rename = "txn_type")]
    pub movement_type: MovementType,
    /// Always strictly positive; direction comes from `movement_type`
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub party_id: Option<i64>,
    pub ref_no: Option<String>,
    /// Business date of the movement
    pub txn_date: NaiveDate,
    pub remarks: Option<String>,
    /// Assigned at append time
    pub created_at: DateTime<Utc>,
}

impl Movement {
    pub fn signed_quantity(&self) -> Decimal {
        self.movement_type.signed(self.quantity)
    }
}

/// A movement about to be appended. Identity and creation time are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub item_id: i64,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub party_id: Option<i64>,
    pub ref_no: Option<String>,
    pub txn_date: NaiveDate,
    pub remarks: Option<String>,
}

/// Recent-activity row joined with item and party names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: i64,
    pub txn_date: NaiveDate,
    pub txn_type: MovementType,
    pub item: String,
    pub qty: Decimal,
    pub unit_price: Option<Decimal>,
    pub party: Option<String>,
    pub ref_no: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Direction of a manual stock correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Increase,
    Decrease,
}

impl AdjustDirection {
    /// Upward corrections are ADJUST records; downward ones are recorded as OUT.
    pub fn movement_type(&self) -> MovementType {
        match self {
            AdjustDirection::Increase => MovementType::Adjust,
            AdjustDirection::Decrease => MovementType::Out,
        }
    }
}

/// Recent-activity ordering: newest creation time first.
///
/// Ties on creation time are broken by descending identity, not ascending,
/// so a later append never lists below an earlier one with the same stamp.
pub fn newest_first(a_created: DateTime<Utc>, a_id: i64, b_created: DateTime<Utc>, b_id: i64) -> Ordering {
    b_created.cmp(&a_created).then_with(|| b_id.cmp(&a_id))
}

/// Creation time for the next append: the clock reading, but never earlier
/// than the newest stamp already in the log.
pub fn next_created_at(now: DateTime<Utc>, newest: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match newest {
        Some(newest) if newest > now => newest,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_signed_quantities() {
        let qty = Decimal::from(4);
        assert_eq!(MovementType::In.signed(qty), Decimal::from(4));
        assert_eq!(MovementType::Out.signed(qty), Decimal::from(-4));
        assert_eq!(MovementType::Adjust.signed(qty), Decimal::from(4));
    }

    #[test]
    fn test_movement_type_wire_format() {
        assert_eq!(serde_json::to_string(&MovementType::Adjust).unwrap(), "\"ADJUST\"");
        assert_eq!("OUT".parse::<MovementType>(), Ok(MovementType::Out));
        assert!("out".parse::<MovementType>().is_err());
    }

    #[test]
    fn test_adjust_direction_mapping() {
        assert_eq!(AdjustDirection::Increase.movement_type(), MovementType::Adjust);
        assert_eq!(AdjustDirection::Decrease.movement_type(), MovementType::Out);
    }

    #[test]
    fn test_newest_first_breaks_ties_by_id() {
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();

        assert_eq!(newest_first(t2, 1, t1, 2), Ordering::Less);
        assert_eq!(newest_first(t1, 3, t1, 2), Ordering::Less);
        assert_eq!(newest_first(t1, 2, t1, 3), Ordering::Greater);
    }

    #[test]
    fn test_next_created_at_never_goes_back() {
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();

        assert_eq!(next_created_at(t2, None), t2);
        assert_eq!(next_created_at(t2, Some(t1)), t2);
        // Clock stepped back
        assert_eq!(next_created_at(t1, Some(t2)), t2);
    }
}
