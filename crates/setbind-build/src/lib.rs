//! Build-script front-end for entity-binding methods.
//!
//! Reads a Rust source file declaring `#[entity]` structs and traits with
//! `#[set_entity]` methods, and writes the same declarations (markers
//! removed) followed by a generated implementation of every binding trait.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     let out = std::path::Path::new(&std::env::var("OUT_DIR").unwrap()).join("dao.rs");
//!     setbind_build::build("schema/dao.rs", out).unwrap();
//! }
//! ```

mod config;
mod dao;
mod entity;
mod error;
mod resolve;


pub use config::{BuildConfig, ENV_DAO_SUFFIX, ENV_DENY_WARNINGS, ENV_SETTER};
pub use dao::SET_ENTITY_ATTR;
pub use entity::ENTITY_ATTR;
pub use error::BuildError;
pub use setbind_core::{Diagnostic, Severity};

use dao::DaoBuilder;
use quote::ToTokens;
use resolve::TypeResolver;
use std::{fs, path::Path};
use tracing::debug;

///
/// Generated
///

#[derive(Clone, Debug)]
pub struct Generated {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diag| diag.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diag| !diag.is_error())
    }
}

/// Generate binding implementations for `source`.
///
/// Entity and parse problems fail the whole file. Method-level problems are
/// returned as diagnostics; a trait with any rejected method gets no
/// implementation, while other traits are still generated.
pub fn generate(source: &str, config: &BuildConfig) -> Result<Generated, BuildError> {
    let mut file = syn::parse_file(source)?;

    let entities = entity::discover(&file.items)?;
    debug!(entities = entities.len(), "discovered entities");

    let resolver = TypeResolver::new(&entities, &config.custom_settables);
    let diagnostics = DaoBuilder::new(config, resolver).expand(&mut file.items);
    entity::strip_attrs(&mut file.items);

    Ok(Generated {
        code: file.to_token_stream().to_string(),
        diagnostics,
    })
}

/// Build-script entry point using [`BuildConfig::from_env`].
pub fn build(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), BuildError> {
    build_with(input, output, &BuildConfig::from_env())
}

/// Generate `input` into `output`, reporting warnings to cargo.
pub fn build_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &BuildConfig,
) -> Result<(), BuildError> {
    let input = input.as_ref();
    let output = output.as_ref();

    println!("cargo:rerun-if-changed={}", input.display());
    for var in [ENV_SETTER, ENV_DAO_SUFFIX, ENV_DENY_WARNINGS] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let source = fs::read_to_string(input).map_err(|source| BuildError::Read {
        path: input.display().to_string(),
        source,
    })?;

    let generated = generate(&source, config)?;
    for warning in generated.warnings() {
        println!("cargo:warning={warning}");
    }

    if generated.has_errors() {
        return Err(BuildError::Rejected(generated.errors().cloned().collect()));
    }

    fs::write(output, &generated.code).map_err(|source| BuildError::Write {
        path: output.display().to_string(),
        source,
    })
}
