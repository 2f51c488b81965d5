//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::Order;
use shared::order::{CreateOrderInput, OrderStatusInput, PaymentInput, PaymentResult};

use crate::api::{ApiJson, AppResult, OpResponse};
use crate::core::ServerState;
use crate::utils::{ok, run_blocking};

/// POST /api/orders - 开单
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreateOrderInput>,
) -> AppResult<Json<OpResponse<Order>>> {
    let manager = state.manager.clone();
    let order = run_blocking(move || manager.create_order(payload)).await?;
    Ok(ok(order))
}

/// GET /api/orders/active - 所有活动订单
pub async fn list_active(
    State(state): State<ServerState>,
) -> AppResult<Json<OpResponse<Vec<Order>>>> {
    let manager = state.manager.clone();
    let orders = run_blocking(move || manager.list_active_orders()).await?;
    Ok(ok(orders))
}

/// GET /api/orders/{id} - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<Order>>> {
    let manager = state.manager.clone();
    let order = run_blocking(move || manager.get_order(&id)).await?;
    Ok(ok(order))
}

/// POST /api/orders/{id}/payment - 支付
pub async fn payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<PaymentInput>,
) -> AppResult<Json<OpResponse<PaymentResult>>> {
    let manager = state.manager.clone();
    let result = run_blocking(move || {
        manager.process_payment(&id, payload.method, payload.amount_tendered)
    })
    .await?;
    Ok(ok(result))
}

/// POST /api/orders/{id}/receive - 送达 (释放桌台)
pub async fn receive(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<Order>>> {
    let manager = state.manager.clone();
    let order = run_blocking(move || manager.mark_as_received(&id)).await?;
    Ok(ok(order))
}

/// POST /api/orders/{id}/cancel - 取消 (释放桌台)
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<Order>>> {
    let manager = state.manager.clone();
    let order = run_blocking(move || manager.cancel_order(&id)).await?;
    Ok(ok(order))
}

/// PUT /api/orders/{id}/status - 厨房流程状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<OrderStatusInput>,
) -> AppResult<Json<OpResponse<Order>>> {
    let manager = state.manager.clone();
    let order = run_blocking(move || manager.update_order_status(&id, payload.status)).await?;
    Ok(ok(order))
}
