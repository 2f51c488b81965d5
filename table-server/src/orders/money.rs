//! Money calculation utilities using rust_decimal for precision
//!
//! Prices and totals are stored as `f64` (JSON-friendly), but every sum and
//! product is computed with `Decimal` and rounded back to cents.

use super::manager::ManagerError;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use rust_decimal::prelude::*;
use shared::models::OrderItem;
use shared::order::OrderItemInput;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item (R$1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to cents
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate an item line before it becomes part of an order
pub fn validate_item(item: &OrderItemInput) -> Result<(), ManagerError> {
    if item.product_id.trim().is_empty() {
        return Err(ManagerError::Validation("produto inválido".to_string()));
    }

    if item.quantity <= 0 || item.quantity > MAX_QUANTITY {
        return Err(ManagerError::Validation(format!(
            "quantidade inválida: {}",
            item.quantity
        )));
    }

    if !item.price.is_finite() || item.price < 0.0 || item.price > MAX_PRICE {
        return Err(ManagerError::Validation(format!(
            "preço inválido: {}",
            item.price
        )));
    }

    validate_optional_text(&item.notes, "notes", MAX_NOTE_LEN)?;

    Ok(())
}

/// Validate a batch of items; an empty batch is rejected
pub fn validate_items(items: &[OrderItemInput]) -> Result<(), ManagerError> {
    if items.is_empty() {
        return Err(ManagerError::EmptyOrder);
    }
    items.iter().try_for_each(validate_item)
}

/// Line total (price * quantity) for one item
pub fn line_total(price: f64, quantity: i32) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// Order total: sum of price * quantity over every item
pub fn calculate_total(items: &[OrderItem]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|item| line_total(item.price, item.quantity))
        .sum();
    to_f64(total)
}
