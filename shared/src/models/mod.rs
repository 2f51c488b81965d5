//! Data models
//!
//! Shared between the server and its clients (via API).
//! All IDs are opaque strings.

pub mod dining_table;
pub mod order;

// Re-exports
pub use dining_table::*;
pub use order::*;
