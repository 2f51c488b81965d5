//! Operation result envelope
//!
//! Every manager operation surfaces to callers as this discriminated union:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": "mesa já possui pedido ativo", "code": 7002, "kind": "CONFLICT" }
//! ```
//!
//! Callers branch on `success` instead of catching exceptions.

use crate::error::{AppError, ErrorCode, ErrorKind};
use serde::{Deserialize, Serialize};

/// Success/failure envelope returned by every operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl<T> OpResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            kind: None,
        }
    }

    /// 创建错误响应
    pub fn failure(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.message.clone()),
            code: Some(err.code),
            kind: Some(err.kind()),
        }
    }
}

impl<T, E> From<Result<T, E>> for OpResponse<T>
where
    E: Into<AppError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(&e.into()),
        }
    }
}
