//! Classification and body synthesis for entity-binding methods.
//!
//! A binding method copies every mapped field of an entity into a settable
//! target. [`classify`] decides whether a declared signature is one of the
//! legal shapes; [`synthesize`] turns a valid shape into a
//! [`GeneratedBinding`]. Both are pure, so methods can be handled in any
//! order or concurrently.
#![warn(unreachable_pub)]

pub mod classify;
pub mod diagnostic;
pub mod process;
pub mod render;
pub mod synth;


pub use classify::{Classification, ClassifyError, classify};
pub use diagnostic::{Diagnostic, Severity};
pub use process::{MethodOutcome, MethodReport, process_method, process_methods};
pub use render::RenderError;
pub use synth::{FieldCopy, GeneratedBinding, ReturnExpr, synthesize};

// re-exported so front-ends only need one dependency
pub use setbind_schema as schema;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Classification, ClassifyError, Diagnostic, GeneratedBinding, MethodOutcome, ReturnExpr,
        Severity,
    };
    pub use setbind_schema::prelude::*;
}
