//! 后台任务
//!
//! - 事件监听器：订阅生命周期事件并写入结构化日志

use crate::orders::TableOrderManager;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Log every lifecycle event under the `events` target
///
/// Runs until the manager's sender is dropped.
pub fn spawn_event_listener(manager: &TableOrderManager) -> JoinHandle<()> {
    let mut rx = manager.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    tracing::info!(
                        target: "events",
                        sequence = event.sequence,
                        kind = event.kind(),
                        table_id = ?event.table_id,
                        order_id = ?event.order_id,
                        "Lifecycle event"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event listener lagged behind");
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("Event channel closed, listener stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::OrderStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_listener_stops_when_manager_dropped() {
        let manager = Arc::new(TableOrderManager::with_storage(
            OrderStorage::open_in_memory().unwrap(),
        ));
        let handle = spawn_event_listener(&manager);
        manager.seed_tables(1).unwrap();
        manager.release_table("table_1").unwrap();

        drop(manager);
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
