use super::super::storage::StorageError;
use shared::error::{AppError, ErrorCode, ErrorKind};
use shared::models::OrderStatus;
use thiserror::Error;

/// Manager errors
///
/// Display strings are the user-facing messages; identifiers travel in the
/// `AppError` details instead.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(String),

    #[error("pedido sem itens")]
    EmptyOrder,

    #[error("valor de pagamento inválido: {0}")]
    InvalidPaymentAmount(f64),

    #[error("transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("mesa não encontrada")]
    TableNotFound(String),

    #[error("pedido não encontrado")]
    OrderNotFound(String),

    #[error("mesa não possui pedido ativo")]
    NoActiveOrder(String),

    #[error("mesa já possui pedido ativo")]
    TableOccupied { table_id: String, order_id: String },

    #[error("mesa em manutenção")]
    TableUnderMaintenance(String),

    #[error("mesa já cadastrada")]
    TableAlreadyExists(String),

    #[error("mesa possui pedidos ativos")]
    TableHasOrders(String),

    #[error("pedido já foi pago")]
    OrderAlreadyPaid(String),

    #[error("pedido já foi entregue")]
    OrderAlreadyCompleted(String),

    #[error("pedido já foi cancelado")]
    OrderAlreadyVoided(String),
}

impl ManagerError {
    /// Error for an order that is already in a terminal state
    pub(crate) fn terminal(order_id: &str, status: OrderStatus) -> Self {
        match status {
            OrderStatus::Cancelado => Self::OrderAlreadyVoided(order_id.to_string()),
            _ => Self::OrderAlreadyCompleted(order_id.to_string()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Storage(e) => classify_storage_error(e),
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::EmptyOrder => ErrorCode::OrderEmpty,
            Self::InvalidPaymentAmount(_) => ErrorCode::PaymentInvalidAmount,
            Self::InvalidTransition { .. } => ErrorCode::OrderInvalidTransition,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
            Self::OrderNotFound(_) => ErrorCode::OrderNotFound,
            Self::NoActiveOrder(_) => ErrorCode::TableNoActiveOrder,
            Self::TableOccupied { .. } => ErrorCode::TableOccupied,
            Self::TableUnderMaintenance(_) => ErrorCode::TableUnderMaintenance,
            Self::TableAlreadyExists(_) => ErrorCode::TableAlreadyExists,
            Self::TableHasOrders(_) => ErrorCode::TableHasOrders,
            Self::OrderAlreadyPaid(_) => ErrorCode::OrderAlreadyPaid,
            Self::OrderAlreadyCompleted(_) => ErrorCode::OrderAlreadyCompleted,
            Self::OrderAlreadyVoided(_) => ErrorCode::OrderAlreadyVoided,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}

/// 将存储错误转换为错误码
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::StorageCorrupted;
    }

    // redb 错误通过字符串匹配分类
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    // 默认：系统繁忙（Database/Transaction/Table/Storage/Commit 错误）
    ErrorCode::SystemBusy
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        let code = err.code();
        match err {
            ManagerError::Storage(e) => {
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                // 保留技术细节用于日志/调试
                AppError::with_message(code, e.to_string())
            }
            ManagerError::TableOccupied {
                ref table_id,
                ref order_id,
            } => AppError::with_message(code, err.to_string())
                .with_detail("table_id", table_id.as_str())
                .with_detail("order_id", order_id.as_str()),
            ManagerError::TableNotFound(ref id)
            | ManagerError::NoActiveOrder(ref id)
            | ManagerError::TableUnderMaintenance(ref id)
            | ManagerError::TableAlreadyExists(ref id)
            | ManagerError::TableHasOrders(ref id) => {
                AppError::with_message(code, err.to_string()).with_detail("table_id", id.as_str())
            }
            ManagerError::OrderNotFound(ref id)
            | ManagerError::OrderAlreadyPaid(ref id)
            | ManagerError::OrderAlreadyCompleted(ref id)
            | ManagerError::OrderAlreadyVoided(ref id) => {
                AppError::with_message(code, err.to_string()).with_detail("order_id", id.as_str())
            }
            ManagerError::Validation(_)
            | ManagerError::EmptyOrder
            | ManagerError::InvalidPaymentAmount(_)
            | ManagerError::InvalidTransition { .. } => {
                AppError::with_message(code, err.to_string())
            }
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
