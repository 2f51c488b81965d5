//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Table occupancy status
///
/// Only `Livre` and `Ocupada` are entered by the lifecycle manager;
/// `Reservada` and `Manutencao` are set by admin setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    /// Free
    #[default]
    Livre,
    /// Occupied by an active order
    Ocupada,
    /// Reserved
    Reservada,
    /// Under maintenance
    Manutencao,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Livre => "LIVRE",
            Self::Ocupada => "OCUPADA",
            Self::Reservada => "RESERVADA",
            Self::Manutencao => "MANUTENCAO",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity (mesa)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    /// Display number
    pub number: i32,
    pub capacity: i32,
    pub status: TableStatus,
    /// Staff member currently serving the table (weak reference)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    pub id: String,
    pub number: i32,
    #[serde(default)]
    pub capacity: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TableStatus::Manutencao).unwrap(),
            "\"MANUTENCAO\""
        );
        let status: TableStatus = serde_json::from_str("\"OCUPADA\"").unwrap();
        assert_eq!(status, TableStatus::Ocupada);
        assert_eq!(TableStatus::Reservada.to_string(), "RESERVADA");
    }

    #[test]
    fn test_table_camel_case() {
        let table = DiningTable {
            id: "table_1".to_string(),
            number: 1,
            capacity: 4,
            status: TableStatus::Livre,
            assigned_user_id: Some("staff_1".to_string()),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["assignedUserId"], "staff_1");
        assert_eq!(json["status"], "LIVRE");
    }
}
