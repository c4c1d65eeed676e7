//! Accumulates diagnostics across a whole document.

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics so a single load reports every problem at once.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity().is_error())
    }

    /// Returns the warnings if there were no errors, or every diagnostic as a
    /// [`ParseError`] otherwise.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors() {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
