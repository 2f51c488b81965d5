//! Table Server - 餐厅桌台/订单生命周期服务
//!
//! # 架构概述
//!
//! - **订单生命周期** (`orders`): 开单、加菜、支付、送达、取消，单桌单活动订单
//! - **HTTP API** (`api`): axum 路由，所有响应使用 `OpResponse` 信封
//! - **核心** (`core`): 配置、状态、服务器
//!
//! # 模块结构
//!
//! ```text
//! table-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、校验、工具函数
//! └── orders/        # 管理器、redb 存储、桌台锁
//! ```

pub mod api;
pub mod core;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::orders::{ManagerError, ManagerResult, OrderStorage, TableOrderManager};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在则忽略)
/// 2. 按配置初始化日志 (控制台 + work_dir/logs)
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        Some(config.log_dir().as_path()),
    )?;

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  __  __
 |  \/  | ___  ___  __ _ ___
 | |\/| |/ _ \/ __|/ _` / __|
 | |  | |  __/\__ \ (_| \__ \
 |_|  |_|\___||___/\__,_|___/
    "#
    );
}
