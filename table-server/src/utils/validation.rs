//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! lifecycle operations before anything touches storage.

use crate::orders::manager::ManagerError;

// ── Text length limits ──────────────────────────────────────────────

/// Identifiers: table id, staff user id, product id
pub const MAX_ID_LEN: usize = 100;

/// Notes on orders and items
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), ManagerError> {
    if value.trim().is_empty() {
        return Err(ManagerError::Validation(format!("{field} não pode ser vazio")));
    }
    if value.len() > max_len {
        return Err(ManagerError::Validation(format!(
            "{field} muito longo ({} caracteres, máx {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ManagerError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(ManagerError::Validation(format!(
            "{field} muito longo ({} caracteres, máx {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a table identifier.
///
/// Blank or oversized ids are all reported as "mesa inválida".
pub fn validate_table_id(table_id: &str) -> Result<(), ManagerError> {
    if table_id.trim().is_empty() || table_id.len() > MAX_ID_LEN {
        return Err(ManagerError::Validation("mesa inválida".to_string()));
    }
    Ok(())
}
