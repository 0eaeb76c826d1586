//! Plain-data description of entity-binding method signatures.
//!
//! Front-ends resolve declared parameters into these types; the core crate
//! consumes them without ever touching a host-compiler API.

pub mod entity;
pub mod error;
pub mod signature;
pub mod types;
pub mod validate;

/// Maximum length for entity, field and parameter identifiers.
pub const MAX_IDENT_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        entity::{EntityField, EntityShape},
        err,
        error::{ErrorList, SchemaError},
        signature::{MethodSignature, Parameter, ReturnKind, TypeKind},
        types::{Mutability, NamingConvention, SettableKind},
    };
    pub use serde::{Deserialize, Serialize};
}
