//! Error codes for netlist document diagnostics.
//!
//! - `E0xx` - Document syntax and structure
//! - `E1xx` - Identifiers and endpoints
//! - `W0xx` - Warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed document.
    ///
    /// The TOML is invalid, or a table does not have the expected shape
    /// (unknown key, wrong value type, missing required key).
    E001,

    /// Invalid endpoint.
    ///
    /// Endpoints are written `node` or `node.port`.
    E100,

    /// Invalid identifier.
    ///
    /// Node ids, port names and net names must be non-empty and must not
    /// contain whitespace or the `.` separator.
    E101,

    /// Net without targets.
    ///
    /// A net was declared with an empty `targets` list.
    W001,
}

impl ErrorCode {
    /// Returns a short description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed netlist document",
            ErrorCode::E100 => "invalid endpoint",
            ErrorCode::E101 => "invalid identifier",
            ErrorCode::W001 => "net without targets",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
