//! Error types for Netview operations.
//!
//! [`NetviewError`] wraps every error condition that can occur between
//! reading a netlist document and writing the rendered diagram.

use std::io;

use thiserror::Error;

use netview_netlist::error::ParseError;

use crate::{
    layout::{ConsistencyError, LayoutError},
    view::ViewError,
};

/// The main error type for Netview operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document source next to the structured
/// diagnostics so callers can print them with source snippets.
#[derive(Debug, Error)]
pub enum NetviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("View error: {0}")]
    View(#[from] ViewError),
}

impl NetviewError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
