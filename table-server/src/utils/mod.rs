//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`run_blocking`] - 在阻塞线程池中调用管理器
//! - 日志、输入校验

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::response::OpResponse;

use crate::orders::ManagerError;
use axum::Json;

/// Run a synchronous manager call on the blocking pool
///
/// redb I/O is synchronous, so handlers never call the manager on an async
/// worker thread.
pub async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, ManagerError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(AppError::from),
        Err(e) => {
            tracing::error!(error = %e, "Blocking task failed");
            Err(AppError::internal(e.to_string()))
        }
    }
}

/// Wrap data in the success envelope
pub fn ok<T>(data: T) -> Json<OpResponse<T>> {
    Json(OpResponse::success(data))
}
