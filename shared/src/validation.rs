//! Validation utilities for Stockroom forms

use rust_decimal::Decimal;

/// Largest quantity a single movement may carry (1,000,000,000)
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted unit, cost or sale price (1,000,000,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Validate an item name (already trimmed)
pub fn validate_item_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Item name is required");
    }
    Ok(())
}

/// Validate a party name entered on the party screen
pub fn validate_party_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    Ok(())
}

/// Movement quantities must be strictly positive and at most `MAX_QUANTITY`
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    if quantity > MAX_QUANTITY {
        return Err("Quantity is too large");
    }
    Ok(())
}

/// Prices may be zero but never negative or above `MAX_PRICE`
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    if price > MAX_PRICE {
        return Err("Price is too large");
    }
    Ok(())
}

/// Stock-out guard: the requested quantity must not exceed what is on hand
pub fn check_sufficient_stock(available: Decimal, requested: Decimal) -> Result<(), &'static str> {
    if requested > available {
        return Err("Not enough stock available");
    }
    Ok(())
}

/// Trim optional form text; blank becomes `None`
pub fn clean_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
