use setbind_core::{Diagnostic, schema::error::ErrorList};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse source: {0}")]
    Parse(#[from] syn::Error),

    #[error("invalid #[entity] attribute on '{item}': {message}")]
    Attribute { item: String, message: String },

    #[error("entity '{0}' is declared more than once")]
    DuplicateEntity(String),

    #[error("entity '{0}' must be a struct with named fields")]
    UnsupportedEntity(String),

    #[error("invalid entity '{entity}':\n{errors}")]
    Schema { entity: String, errors: ErrorList },

    #[error("binding generation failed:\n{}", join_lines(.0))]
    Rejected(Vec<Diagnostic>),
}

fn join_lines(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
