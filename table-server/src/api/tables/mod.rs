//! Dining Table API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tables | GET | 桌台列表 |
//! | /api/tables | POST | 创建桌台 |
//! | /api/tables/{id} | GET | 单个桌台 |
//! | /api/tables/{id}/select | POST | 选择桌台 |
//! | /api/tables/{id}/orders/items | POST | 向当前订单加菜 |
//! | /api/tables/{id}/status | GET | 状态对账 |
//! | /api/tables/{id}/status | PUT | 管理员设置状态 |
//! | /api/tables/{id}/state | GET | 桌台 + 活动订单 |
//! | /api/tables/{id}/release | POST | 强制释放 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/select", post(handler::select))
        .route("/{id}/orders/items", post(handler::add_items))
        .route(
            "/{id}/status",
            get(handler::check_status).put(handler::set_status),
        )
        .route("/{id}/state", get(handler::get_state))
        .route("/{id}/release", post(handler::release))
}
