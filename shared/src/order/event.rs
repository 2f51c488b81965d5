//! Lifecycle events - facts broadcast after a successful commit

use crate::models::{OrderStatus, PaymentMethod, TableStatus};
use serde::{Deserialize, Serialize};

/// Lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Event unique ID
    pub event_id: String,
    /// Per-process sequence number (ordering among subscribers)
    pub sequence: u64,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Table the event concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    /// Order the event concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Event payload
    pub payload: EventPayload,
}

/// Event payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    // ========== Orders ==========
    OrderCreated {
        staff_user_id: String,
        item_count: usize,
        total: f64,
    },
    ItemsAdded {
        item_count: usize,
        total: f64,
    },
    OrderPaid {
        method: PaymentMethod,
        amount: f64,
    },
    OrderStatusChanged {
        from: OrderStatus,
        to: OrderStatus,
    },

    // ========== Tables ==========
    TableStatusChanged {
        from: TableStatus,
        to: TableStatus,
    },
}

impl LifecycleEvent {
    /// Short name of the payload variant, for logs
    pub fn kind(&self) -> &'static str {
        match self.payload {
            EventPayload::OrderCreated { .. } => "ORDER_CREATED",
            EventPayload::ItemsAdded { .. } => "ITEMS_ADDED",
            EventPayload::OrderPaid { .. } => "ORDER_PAID",
            EventPayload::OrderStatusChanged { .. } => "ORDER_STATUS_CHANGED",
            EventPayload::TableStatusChanged { .. } => "TABLE_STATUS_CHANGED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tagged() {
        let payload = EventPayload::TableStatusChanged {
            from: TableStatus::Ocupada,
            to: TableStatus::Livre,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "TABLE_STATUS_CHANGED");
        assert_eq!(json["from"], "OCUPADA");
        assert_eq!(json["to"], "LIVRE");
    }
}
