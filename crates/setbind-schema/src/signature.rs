use crate::prelude::*;
use std::fmt::{self, Display};

///
/// MethodSignature
///
/// One declared binding method: its parameters exactly as written (receiver
/// excluded) and its resolved return type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub return_kind: ReturnKind,
}

impl MethodSignature {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_kind: ReturnKind::Void,
        }
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, kind: TypeKind) -> Self {
        self.parameters.push(Parameter::new(name, kind));
        self
    }

    #[must_use]
    pub fn returns(mut self, return_kind: ReturnKind) -> Self {
        self.return_kind = return_kind;
        self
    }
}

///
/// Parameter
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub kind: TypeKind,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// TypeKind
///
/// What a parameter's static type resolved to.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TypeKind {
    Entity(EntityShape),
    Settable(SettableKind),

    /// Anything else, kept by name for diagnostics.
    Other(String),
}

impl TypeKind {
    #[must_use]
    pub const fn as_entity(&self) -> Option<&EntityShape> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_settable(&self) -> Option<&SettableKind> {
        match self {
            Self::Settable(kind) => Some(kind),
            _ => None,
        }
    }
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(entity) => f.write_str(&entity.name),
            Self::Settable(kind) => write!(f, "{kind}"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

///
/// ReturnKind
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ReturnKind {
    #[default]
    Void,
    Settable(SettableKind),
    Other(String),
}

impl ReturnKind {
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

impl Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Settable(kind) => write!(f, "{kind}"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
