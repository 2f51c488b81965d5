//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order fulfillment status
///
/// `Entregue` and `Cancelado` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Pending
    #[default]
    Pendente,
    /// Confirmed
    Confirmado,
    /// Preparing
    Preparando,
    /// Ready
    Pronto,
    /// Delivered
    Entregue,
    /// Cancelled
    Cancelado,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Entregue | Self::Cancelado)
    }

    /// Position along the kitchen workflow, `None` for terminal states
    pub fn workflow_rank(&self) -> Option<u8> {
        match self {
            Self::Pendente => Some(0),
            Self::Confirmado => Some(1),
            Self::Preparando => Some(2),
            Self::Pronto => Some(3),
            Self::Entregue | Self::Cancelado => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "PENDENTE",
            Self::Confirmado => "CONFIRMADO",
            Self::Preparando => "PREPARANDO",
            Self::Pronto => "PRONTO",
            Self::Entregue => "ENTREGUE",
            Self::Cancelado => "CANCELADO",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash
    Dinheiro,
    /// Card
    Cartao,
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dinheiro => "DINHEIRO",
            Self::Cartao => "CARTAO",
            Self::Pix => "PIX",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order item
///
/// `price` is the unit price captured when the item was added; it is never
/// re-read from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
    /// Unit price in currency unit
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// None for orders not bound to a table
    #[serde(default)]
    pub table_id: Option<String>,
    pub staff_user_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Σ price × quantity, two decimals
    pub total: f64,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Entregue.is_terminal());
        assert!(OrderStatus::Cancelado.is_terminal());
        assert!(!OrderStatus::Pendente.is_terminal());
        assert!(!OrderStatus::Pronto.is_terminal());
    }

    #[test]
    fn test_workflow_rank_is_monotonic() {
        let flow = [
            OrderStatus::Pendente,
            OrderStatus::Confirmado,
            OrderStatus::Preparando,
            OrderStatus::Pronto,
        ];
        for pair in flow.windows(2) {
            assert!(pair[0].workflow_rank() < pair[1].workflow_rank());
        }
        assert_eq!(OrderStatus::Cancelado.workflow_rank(), None);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Entregue).unwrap(),
            "\"ENTREGUE\""
        );
        let method: PaymentMethod = serde_json::from_str("\"DINHEIRO\"").unwrap();
        assert_eq!(method, PaymentMethod::Dinheiro);
        assert!(serde_json::from_str::<PaymentMethod>("\"CHEQUE\"").is_err());
    }
}
