use crate::prelude::*;
use convert_case::{Case, Casing};
use darling::FromMeta;
use derive_more::Display;
use std::{fmt, str::FromStr};

///
/// Mutability
///
/// How a settable target reacts to a `set` call. This, not the concrete
/// target type, decides what a binding method has to return.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Mutability {
    /// Every setter call returns a fresh value; the receiver is untouched.
    #[display("value-returning")]
    ValueReturning,

    /// Setter calls mutate the receiver.
    #[display("in-place")]
    InPlace,
}

///
/// SettableKind
///
/// The closed set of targets that expose "set field by name" operations.
/// `Custom` lets a front-end register additional kinds along with their
/// mutability.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum SettableKind {
    BoundStatement,
    BoundStatementBuilder,
    Custom { name: String, mutability: Mutability },
    UdtValue,
}

impl SettableKind {
    pub const BUILTINS: [Self; 3] = [
        Self::BoundStatement,
        Self::BoundStatementBuilder,
        Self::UdtValue,
    ];

    /// Look up a built-in kind by its type name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        Self::BUILTINS.into_iter().find(|kind| kind.name() == name)
    }

    #[must_use]
    pub fn custom(name: impl Into<String>, mutability: Mutability) -> Self {
        Self::Custom {
            name: name.into(),
            mutability,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::BoundStatement => "BoundStatement",
            Self::BoundStatementBuilder => "BoundStatementBuilder",
            Self::Custom { name, .. } => name,
            Self::UdtValue => "UdtValue",
        }
    }

    #[must_use]
    pub const fn mutability(&self) -> Mutability {
        match self {
            Self::BoundStatement => Mutability::ValueReturning,
            Self::BoundStatementBuilder | Self::UdtValue => Mutability::InPlace,
            Self::Custom { mutability, .. } => *mutability,
        }
    }

    #[must_use]
    pub const fn is_value_returning(&self) -> bool {
        matches!(self.mutability(), Mutability::ValueReturning)
    }
}

impl fmt::Display for SettableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// NamingConvention
///
/// Converts an entity field identifier into its mapped column name when the
/// field does not carry an explicit column.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum NamingConvention {
    #[default]
    #[display("as_is")]
    AsIs,
    #[display("kebab-case")]
    KebabCase,
    #[display("lowerCamelCase")]
    LowerCamelCase,
    #[display("snake_case")]
    SnakeCase,
    #[display("UpperCamelCase")]
    UpperCamelCase,
    #[display("UPPER_SNAKE_CASE")]
    UpperSnakeCase,
}

impl NamingConvention {
    #[must_use]
    pub fn apply(self, ident: &str) -> String {
        let ident = ident.strip_prefix("r#").unwrap_or(ident);

        match self {
            Self::AsIs => ident.to_string(),
            Self::KebabCase => ident.to_case(Case::Kebab),
            Self::LowerCamelCase => ident.to_case(Case::Camel),
            Self::SnakeCase => ident.to_case(Case::Snake),
            Self::UpperCamelCase => ident.to_case(Case::Pascal),
            Self::UpperSnakeCase => ident.to_case(Case::Constant),
        }
    }
}

impl FromStr for NamingConvention {
    type Err = String;

    // accepts both the display spelling and the variant name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let convention = match s {
            "as_is" | "AsIs" => Self::AsIs,
            "kebab-case" | "KebabCase" => Self::KebabCase,
            "lowerCamelCase" | "camelCase" | "LowerCamelCase" => Self::LowerCamelCase,
            "snake_case" | "SnakeCase" => Self::SnakeCase,
            "UpperCamelCase" | "PascalCase" => Self::UpperCamelCase,
            "UPPER_SNAKE_CASE" | "UpperSnakeCase" => Self::UpperSnakeCase,
            _ => return Err(format!("unknown naming convention '{s}'")),
        };

        Ok(convention)
    }
}

impl FromMeta for NamingConvention {
    fn from_string(s: &str) -> Result<Self, darling::Error> {
        s.parse::<Self>()
            .map_err(|_| darling::Error::unknown_value(s))
    }
}
