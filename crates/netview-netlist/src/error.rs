//! Diagnostics reported while loading a netlist document.
//!
//! Every problem found in a document becomes a [`Diagnostic`] with an
//! [`ErrorCode`], one or more labeled [`Span`](crate::Span)s and optional
//! help text. All diagnostics of one load are returned together in a
//! [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use netview_netlist::error::{Diagnostic, ErrorCode};
//! # use netview_netlist::Span;
//! let diag = Diagnostic::error("invalid endpoint `alu.`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(40..46), "port name is empty")
//!     .with_help("write endpoints as `node` or `node.port`");
//!
//! assert_eq!(diag.to_string(), "error[E100]: invalid endpoint `alu.`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
