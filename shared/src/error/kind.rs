//! Error kind classification
//!
//! Every [`ErrorCode`] belongs to exactly one [`ErrorKind`]. Kinds are what
//! callers branch on: the first three are business-rule failures returned to
//! the UI as-is, `InfraError` is a persistence or system failure that is safe
//! to retry.

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error taxonomy shared by the manager and the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed input, always caller-fixable
    ValidationError,
    /// Referenced table or order does not exist
    NotFound,
    /// Invariant violation (active order, already paid, already terminal)
    Conflict,
    /// Persistence gateway failure
    InfraError,
}

impl ErrorKind {
    /// Get the wire name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InfraError => "INFRA_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ErrorCode {
    /// Get the kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OrderNotFound
            | Self::TableNotFound
            | Self::TableNoActiveOrder => ErrorKind::NotFound,

            Self::OrderAlreadyPaid
            | Self::OrderAlreadyCompleted
            | Self::OrderAlreadyVoided
            | Self::TableOccupied
            | Self::TableUnderMaintenance
            | Self::TableAlreadyExists
            | Self::TableHasOrders => ErrorKind::Conflict,

            Self::InternalError
            | Self::StorageFull
            | Self::StorageCorrupted
            | Self::SystemBusy => ErrorKind::InfraError,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::OrderInvalidTransition
            | Self::PaymentInvalidAmount => ErrorKind::ValidationError,
        }
    }
}
