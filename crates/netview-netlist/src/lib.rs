//! Netlist document loading for Netview.
//!
//! A netlist document is a TOML file listing nodes and the nets between
//! their ports:
//!
//! ```toml
//! [[nodes]]
//! id = "adder"
//! label = "Adder"
//! inputs = ["a", "b"]
//! outputs = ["sum"]
//!
//! [[nodes]]
//! id = "reg"
//! inputs = ["d"]
//! outputs = ["q"]
//!
//! [[nets]]
//! name = "sum"
//! source = "adder.sum"
//! targets = ["reg.d"]
//! ```
//!
//! [`parse`] turns such a document into a [`Netlist`]. Loading only checks the
//! document's shape and the syntax of identifiers and endpoints; whether the
//! nets refer to existing nodes and ports is checked when a diagram is drawn.
//!
//! # Example
//!
//! ```
//! let source = r#"
//!     [[nodes]]
//!     id = "a"
//!     outputs = ["q"]
//!
//!     [[nodes]]
//!     id = "b"
//!     inputs = ["d"]
//!
//!     [[nets]]
//!     from = "a.q"
//!     to = ["b.d"]
//! "#;
//!
//! let netlist = netview_netlist::parse(source).unwrap();
//! assert_eq!(netlist.nodes().len(), 2);
//! assert_eq!(netlist.nets().len(), 1);
//! ```

pub mod error;

mod document;
mod span;

pub use span::Span;

use log::{debug, info, warn};

use netview_core::netlist::Netlist;

use document::NetlistDocument;
use error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};

/// A loaded netlist together with the warnings reported while loading it.
#[derive(Debug)]
pub struct LoadedNetlist {
    netlist: Netlist,
    warnings: Vec<Diagnostic>,
}

impl LoadedNetlist {
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Consumes the result, returning only the netlist.
    pub fn into_netlist(self) -> Netlist {
        self.netlist
    }
}

/// Loads a netlist document, keeping warnings for the caller to report.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic when the document is
/// malformed or contains at least one invalid identifier or endpoint.
pub fn load(source: &str) -> Result<LoadedNetlist, ParseError> {
    debug!(source_len = source.len(); "Loading netlist document");

    let document: NetlistDocument = toml::from_str(source).map_err(document_error)?;

    let mut collector = DiagnosticCollector::new();
    let netlist = document.into_netlist(&mut collector);
    let warnings = collector.finish()?;

    info!(
        nodes = netlist.nodes().len(),
        nets = netlist.nets().len(),
        warnings = warnings.len();
        "Netlist loaded"
    );

    Ok(LoadedNetlist { netlist, warnings })
}

/// Loads a netlist document, logging any warnings.
///
/// # Errors
///
/// See [`load`].
pub fn parse(source: &str) -> Result<Netlist, ParseError> {
    let loaded = load(source)?;
    for warning in loaded.warnings() {
        warn!("{warning}");
    }
    Ok(loaded.into_netlist())
}

fn document_error(err: toml::de::Error) -> ParseError {
    let mut diagnostic = Diagnostic::error("malformed netlist document").with_code(ErrorCode::E001);
    let message = err.message().trim().to_string();
    diagnostic = match err.span() {
        Some(range) => diagnostic.with_label(Span::new(range), message),
        None => diagnostic.with_help(message),
    };
    ParseError::from(diagnostic)
}
