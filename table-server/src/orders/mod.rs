//! Table-order lifecycle module
//!
//! - **manager**: `TableOrderManager`, the only writer of tables and orders
//! - **storage**: redb-based persistence for tables, orders and the active index
//! - **locks**: per-table mutex registry
//! - **money**: decimal totals and item validation
//!
//! # Architecture
//!
//! ```text
//! HTTP handler → TableOrderManager ─┬─ TableLocks (per table)
//!                                   ├─ OrderStorage (redb txn)
//!                                   └─ broadcast → subscribers
//! ```

pub mod locks;
pub mod manager;
pub mod money;
pub mod storage;

// Re-exports
pub use locks::TableLocks;
pub use manager::{ManagerError, ManagerResult, TableOrderManager};
pub use storage::{OrderStorage, StorageError};

// Re-export shared types for convenience
pub use shared::order::{EventPayload, LifecycleEvent, PaymentResult, TableState};
