//! Unified error codes for the table-order lifecycle
//!
//! Error codes are organized by range:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values for compact serialization and so that
/// front-ends can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been paid
    OrderAlreadyPaid = 4002,
    /// Order has already been delivered
    OrderAlreadyCompleted = 4003,
    /// Order has already been cancelled
    OrderAlreadyVoided = 4004,
    /// Order has no items
    OrderEmpty = 4007,
    /// Order status transition is not allowed
    OrderInvalidTransition = 4008,

    // ==================== 5xxx: Payment ====================
    /// Invalid payment amount
    PaymentInvalidAmount = 5006,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is occupied by another active order
    TableOccupied = 7002,
    /// Table has no active order
    TableNoActiveOrder = 7005,
    /// Table is under maintenance
    TableUnderMaintenance = 7006,
    /// Table id already registered
    TableAlreadyExists = 7007,
    /// Table has active orders
    TableHasOrders = 7104,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default user-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "dados inválidos",
            ErrorCode::InvalidRequest => "requisição inválida",

            // Order
            ErrorCode::OrderNotFound => "pedido não encontrado",
            ErrorCode::OrderAlreadyPaid => "pedido já foi pago",
            ErrorCode::OrderAlreadyCompleted => "pedido já foi entregue",
            ErrorCode::OrderAlreadyVoided => "pedido já foi cancelado",
            ErrorCode::OrderEmpty => "pedido sem itens",
            ErrorCode::OrderInvalidTransition => "transição de status inválida",

            // Payment
            ErrorCode::PaymentInvalidAmount => "valor de pagamento inválido",

            // Table
            ErrorCode::TableNotFound => "mesa não encontrada",
            ErrorCode::TableOccupied => "mesa já possui pedido ativo",
            ErrorCode::TableNoActiveOrder => "mesa não possui pedido ativo",
            ErrorCode::TableUnderMaintenance => "mesa em manutenção",
            ErrorCode::TableAlreadyExists => "mesa já cadastrada",
            ErrorCode::TableHasOrders => "mesa possui pedidos ativos",

            // System
            ErrorCode::InternalError => "erro interno do servidor",
            ErrorCode::StorageFull => "armazenamento cheio",
            ErrorCode::StorageCorrupted => "armazenamento corrompido",
            ErrorCode::SystemBusy => "sistema ocupado, tente novamente",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyPaid),
            4003 => Ok(ErrorCode::OrderAlreadyCompleted),
            4004 => Ok(ErrorCode::OrderAlreadyVoided),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderInvalidTransition),

            // Payment
            5006 => Ok(ErrorCode::PaymentInvalidAmount),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7005 => Ok(ErrorCode::TableNoActiveOrder),
            7006 => Ok(ErrorCode::TableUnderMaintenance),
            7007 => Ok(ErrorCode::TableAlreadyExists),
            7104 => Ok(ErrorCode::TableHasOrders),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
