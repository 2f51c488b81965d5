//! Table-order lifecycle types
//!
//! - Inputs accepted by the lifecycle operations
//! - Result DTOs (`PaymentResult`, `TableState`)
//! - Events broadcast after each committed change

pub mod event;
pub mod types;

// Re-exports
pub use event::{EventPayload, LifecycleEvent};
pub use types::*;
