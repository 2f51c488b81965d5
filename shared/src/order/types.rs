//! Shared types for the table-order lifecycle operations

use crate::models::{DiningTable, Order, OrderStatus, PaymentMethod, TableStatus};
use serde::{Deserialize, Serialize};

// ============================================================================
// Inputs
// ============================================================================

/// Item input - for creating an order or topping one up
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    /// Product ID (catalog reference)
    pub product_id: String,
    /// Quantity, must be positive
    pub quantity: i32,
    /// Unit price snapshot, must be non-negative
    pub price: f64,
    /// Item note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItemInput {
    pub fn new(product_id: impl Into<String>, quantity: i32, price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            price,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    pub items: Vec<OrderItemInput>,
    pub table_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub staff_user_id: String,
}

/// Add products to a table's active order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsInput {
    pub items: Vec<OrderItemInput>,
}

/// Payment input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub method: PaymentMethod,
    /// Cash handed over by the customer, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_tendered: Option<f64>,
}

/// Select table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTableInput {
    pub staff_user_id: String,
}

/// Admin table status change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStatusInput {
    pub status: TableStatus,
}

/// Kitchen workflow status change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusInput {
    pub status: OrderStatus,
}

// ============================================================================
// Results
// ============================================================================

/// Payment confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub order_id: String,
    /// Order total at payment time
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_tendered: Option<f64>,
    pub is_paid: bool,
    pub paid_at: i64,
}

/// Table reconciliation report
///
/// Returned by both `check_status` and `get_state`. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub table: DiningTable,
    pub active_orders: Vec<Order>,
    pub should_be_occupied: bool,
    pub status_matches: bool,
}

impl TableState {
    /// Build the report from a table and its non-terminal orders
    ///
    /// Only OCUPADA counts as occupied; RESERVADA and MANUTENCAO compare as
    /// not occupied.
    pub fn from_parts(table: DiningTable, active_orders: Vec<Order>) -> Self {
        let should_be_occupied = !active_orders.is_empty();
        let status_matches = (table.status == TableStatus::Ocupada) == should_be_occupied;
        Self {
            table,
            active_orders,
            should_be_occupied,
            status_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(status: TableStatus) -> DiningTable {
        DiningTable {
            id: "t1".to_string(),
            number: 1,
            capacity: 4,
            status,
            assigned_user_id: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn active_order() -> Order {
        Order {
            id: "o1".to_string(),
            table_id: Some("t1".to_string()),
            staff_user_id: "s1".to_string(),
            status: OrderStatus::Pendente,
            items: vec![],
            total: 0.0,
            is_paid: false,
            payment_method: None,
            paid_at: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_table_state_matches() {
        let state = TableState::from_parts(table(TableStatus::Ocupada), vec![active_order()]);
        assert!(state.should_be_occupied);
        assert!(state.status_matches);

        let state = TableState::from_parts(table(TableStatus::Livre), vec![]);
        assert!(!state.should_be_occupied);
        assert!(state.status_matches);
    }

    #[test]
    fn test_table_state_drift() {
        let state = TableState::from_parts(table(TableStatus::Livre), vec![active_order()]);
        assert!(state.should_be_occupied);
        assert!(!state.status_matches);

        let state = TableState::from_parts(table(TableStatus::Ocupada), vec![]);
        assert!(!state.should_be_occupied);
        assert!(!state.status_matches);
    }

    #[test]
    fn test_reserved_counts_as_not_occupied() {
        let state = TableState::from_parts(table(TableStatus::Reservada), vec![]);
        assert!(state.status_matches);
        let state = TableState::from_parts(table(TableStatus::Manutencao), vec![active_order()]);
        assert!(!state.status_matches);
    }

    #[test]
    fn test_create_order_input_camel_case() {
        let json = r#"{
            "items": [{"productId": "prod_123", "quantity": 2, "price": 15.50}],
            "tableId": "table_789",
            "staffUserId": "staff_user_123"
        }"#;
        let input: CreateOrderInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.items[0].product_id, "prod_123");
        assert_eq!(input.items[0].price, 15.5);
        assert_eq!(input.table_id, "table_789");
        assert!(input.notes.is_none());
    }
}
