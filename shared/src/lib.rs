//! Shared types for the table-order lifecycle
//!
//! Domain models, operation inputs and results, the response envelope and
//! the unified error system used by the server and its clients.

pub mod error;
pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use response::OpResponse;
pub use serde::{Deserialize, Serialize};
