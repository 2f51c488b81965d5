//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DiningTable, DiningTableCreate, Order};
use shared::order::{AddItemsInput, SelectTableInput, TableState, TableStatusInput};

use crate::api::{ApiJson, AppResult, OpResponse};
use crate::core::ServerState;
use crate::utils::{ok, run_blocking};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<OpResponse<Vec<DiningTable>>>> {
    let manager = state.manager.clone();
    let tables = run_blocking(move || manager.list_tables()).await?;
    Ok(ok(tables))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DiningTableCreate>,
) -> AppResult<Json<OpResponse<DiningTable>>> {
    let manager = state.manager.clone();
    let table = run_blocking(move || manager.create_table(payload)).await?;
    Ok(ok(table))
}

/// GET /api/tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<DiningTable>>> {
    let manager = state.manager.clone();
    let table = run_blocking(move || manager.get_table(&id)).await?;
    Ok(ok(table))
}

/// POST /api/tables/{id}/select - 选择桌台
pub async fn select(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<SelectTableInput>,
) -> AppResult<Json<OpResponse<DiningTable>>> {
    let manager = state.manager.clone();
    let table =
        run_blocking(move || manager.select_table(&id, &payload.staff_user_id)).await?;
    Ok(ok(table))
}

/// POST /api/tables/{id}/orders/items - 向桌台的活动订单加菜
pub async fn add_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<AddItemsInput>,
) -> AppResult<Json<OpResponse<Order>>> {
    let manager = state.manager.clone();
    let order = run_blocking(move || manager.add_products_to_order(&id, payload.items)).await?;
    Ok(ok(order))
}

/// GET /api/tables/{id}/status - 状态对账 (只读)
pub async fn check_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<TableState>>> {
    let manager = state.manager.clone();
    let report = run_blocking(move || manager.check_status(&id)).await?;
    Ok(ok(report))
}

/// PUT /api/tables/{id}/status - 管理员设置桌台状态
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<TableStatusInput>,
) -> AppResult<Json<OpResponse<DiningTable>>> {
    let manager = state.manager.clone();
    let table = run_blocking(move || manager.set_table_status(&id, payload.status)).await?;
    Ok(ok(table))
}

/// GET /api/tables/{id}/state - 桌台及其活动订单
pub async fn get_state(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<TableState>>> {
    let manager = state.manager.clone();
    let table_state = run_blocking(move || manager.get_state(&id)).await?;
    Ok(ok(table_state))
}

/// POST /api/tables/{id}/release - 强制释放桌台
pub async fn release(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OpResponse<DiningTable>>> {
    let manager = state.manager.clone();
    let table = run_blocking(move || manager.release_table(&id)).await?;
    Ok(ok(table))
}
