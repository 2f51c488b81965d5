//! Unified error system
//!
//! - [`ErrorCode`]: stable numeric codes for every failure
//! - [`ErrorKind`]: the four-way taxonomy callers branch on
//! - [`AppError`]: code + message + details, renders as an HTTP response
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 7xxx: Table errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorKind};
//!
//! let err = AppError::new(ErrorCode::TableOccupied).with_detail("table_id", "table_789");
//! assert_eq!(err.kind(), ErrorKind::Conflict);
//! assert_eq!(err.message, "mesa já possui pedido ativo");
//! ```

mod codes;
mod http;
mod kind;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use kind::ErrorKind;
pub use types::{AppError, AppResult};
