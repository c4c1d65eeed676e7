//! The error returned when a netlist document cannot be loaded.

use std::fmt;

use crate::error::Diagnostic;

/// One or more diagnostics, at least one of which is an error.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error, warnings included.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self
            .diagnostics
            .iter()
            .filter(|diag| diag.severity().is_error());

        if let Some(first) = errors.next() {
            write!(f, "{first}")?;
            let rest = errors.count();
            if rest > 0 {
                write!(f, " (+{rest} more)")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_first_error_and_count() {
        let err = ParseError::new(vec![
            Diagnostic::warning("just a warning"),
            Diagnostic::error("first"),
            Diagnostic::error("second"),
        ]);

        assert_eq!(err.to_string(), "error: first (+1 more)");
        assert_eq!(err.diagnostics().len(), 3);
    }
}
