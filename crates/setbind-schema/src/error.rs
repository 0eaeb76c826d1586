use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("invalid identifier '{ident}': {reason}")]
    InvalidIdent { ident: String, reason: String },

    #[error("entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("entity '{entity}' maps fields '{first}' and '{second}' to the same column '{column}'")]
    DuplicateColumn {
        entity: String,
        column: String,
        first: String,
        second: String,
    },

    #[error("{0}")]
    Custom(String),
}

///
/// ErrorList
///
/// Accumulates every problem found during a validation pass instead of
/// stopping at the first one.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorList {
    errors: Vec<SchemaError>,
}

impl ErrorList {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, err: impl Into<SchemaError>) {
        self.errors.push(err.into());
    }

    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    // result
    // Ok when nothing was recorded
    pub fn result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorList {}

impl From<SchemaError> for ErrorList {
    fn from(err: SchemaError) -> Self {
        Self { errors: vec![err] }
    }
}

/// Record a formatted custom error on an [`ErrorList`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add($crate::error::SchemaError::Custom(format!($($arg)*)))
    };
}
