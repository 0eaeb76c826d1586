use derive_more::Display;
use serde::Serialize;
use std::fmt;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Severity {
    #[display("warning")]
    Warning,
    #[display("error")]
    Error,
}

///
/// Diagnostic
///
/// A message about one declared method. Reporting it (and deciding whether
/// an error aborts anything beyond that method) is up to the caller.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub method: String,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn error(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            method: method.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            method: method.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Promote a warning to an error, leaving the message untouched.
    #[must_use]
    pub fn deny(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in '{}': {}", self.severity, self.method, self.message)
    }
}
