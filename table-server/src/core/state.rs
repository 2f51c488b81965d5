use std::path::PathBuf;
use std::sync::Arc;

use crate::core::Config;
use crate::core::error::Result;
use crate::orders::TableOrderManager;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，每个 axum handler 持有一份克隆。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | manager | Arc<TableOrderManager> | 桌台/订单生命周期管理器 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub manager: Arc<TableOrderManager>,
}

impl ServerState {
    pub fn new(config: Config, manager: Arc<TableOrderManager>) -> Self {
        Self { config, manager }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. redb 数据库 (work_dir/table_orders.redb)
    /// 3. 预置桌台 (SEED_TABLES)
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.db_path();
        let manager = TableOrderManager::new(&db_path)?;
        tracing::info!(db_path = %db_path.display(), "Database opened");

        if config.seed_tables > 0 {
            let created = manager.seed_tables(config.seed_tables)?;
            tracing::info!(requested = config.seed_tables, created, "Tables seeded");
        }

        Ok(Self::new(config.clone(), Arc::new(manager)))
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
