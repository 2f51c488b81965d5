//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 (含存储探测) |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "epoch": "...", "tables": 12, "activeOrders": 3 }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 服务器实例 epoch (重启后变化)
    epoch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tables: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_orders: Option<usize>,
}

/// GET /health
async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let manager = state.manager.clone();
    let probe = tokio::task::spawn_blocking(move || {
        let tables = manager.storage().table_count()?;
        let active = manager.list_active_orders()?.len();
        Ok::<_, crate::orders::ManagerError>((tables, active))
    })
    .await;

    let counts = match probe {
        Ok(Ok(counts)) => Some(counts),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Health check storage probe failed");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check task failed");
            None
        }
    };

    let status = if counts.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = HealthResponse {
        status: if counts.is_some() { "ok" } else { "error" },
        version: env!("CARGO_PKG_VERSION"),
        epoch: state.manager.epoch().to_string(),
        tables: counts.map(|(tables, _)| tables),
        active_orders: counts.map(|(_, active)| active),
    };
    (status, Json(body))
}
