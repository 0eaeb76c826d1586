use crate::{prelude::*, validate::validate_ident};
use std::collections::{BTreeMap, BTreeSet};

///
/// EntityShape
///
/// A user type marked as mappable, with its fields in declaration order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityShape {
    pub name: String,

    #[serde(default)]
    pub naming: NamingConvention,

    pub fields: Vec<EntityField>,
}

impl EntityShape {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            naming: NamingConvention::default(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    #[must_use]
    pub fn field(mut self, ident: impl Into<String>) -> Self {
        self.fields.push(EntityField::new(ident));
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: EntityField) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields that take part in binding, in declaration order.
    pub fn mapped_fields(&self) -> impl Iterator<Item = &EntityField> {
        self.fields.iter().filter(|field| !field.transient)
    }

    /// Resolve the column a field is bound to.
    #[must_use]
    pub fn column_of(&self, field: &EntityField) -> String {
        field
            .column
            .clone()
            .unwrap_or_else(|| self.naming.apply(&field.ident))
    }

    /// Check identifiers and reject ambiguous field or column mappings.
    pub fn validate(&self) -> Result<(), ErrorList> {
        let mut errs = ErrorList::new();

        if let Err(e) = validate_ident(&self.name) {
            errs.add(e);
        }

        let mut seen_fields = BTreeSet::new();
        let mut seen_columns: BTreeMap<String, &str> = BTreeMap::new();

        for field in &self.fields {
            if let Err(e) = validate_ident(&field.ident) {
                errs.add(e);
            }

            if !seen_fields.insert(field.ident.as_str()) {
                errs.add(SchemaError::DuplicateField {
                    entity: self.name.clone(),
                    field: field.ident.clone(),
                });
                continue;
            }

            if field.transient {
                continue;
            }

            let column = self.column_of(field);
            if column.is_empty() {
                err!(
                    errs,
                    "entity '{}' maps field '{}' to an empty column",
                    self.name,
                    field.ident
                );
            } else if let Some(first) = seen_columns.insert(column.clone(), &field.ident) {
                errs.add(SchemaError::DuplicateColumn {
                    entity: self.name.clone(),
                    column,
                    first: first.to_string(),
                    second: field.ident.clone(),
                });
            }
        }

        errs.result()
    }
}

///
/// EntityField
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityField {
    pub ident: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub transient: bool,
}

impl EntityField {
    #[must_use]
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            column: None,
            transient: false,
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub const fn transient(mut self) -> Self {
        self.transient = true;
        self
    }
}
