use crate::classify::Classification;
use serde::Serialize;
use setbind_schema::prelude::*;

///
/// GeneratedBinding
///
/// The body of one binding method: a copy per mapped entity field, in entity
/// declaration order, followed by the return expression.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GeneratedBinding {
    pub method: String,
    pub entity_param: String,
    pub target_param: String,
    pub target_kind: SettableKind,
    pub copies: Vec<FieldCopy>,
    pub ret: ReturnExpr,

    /// Advisory attached to a valid method; never blocks generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl GeneratedBinding {
    /// Whether each copy produces a new target value that must be threaded
    /// into the next one.
    #[must_use]
    pub const fn threads_target(&self) -> bool {
        self.target_kind.is_value_returning()
    }

    #[must_use]
    pub const fn has_warning(&self) -> bool {
        self.warning.is_some()
    }
}

///
/// FieldCopy
/// Read `field` from the entity and set it on the target under `column`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldCopy {
    pub field: String,
    pub column: String,
}

///
/// ReturnExpr
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ReturnExpr {
    /// Declared void: nothing is returned.
    Void,

    /// The target was mutated in place and is handed back as is.
    Unchanged,

    /// The value produced by the last setter call.
    Threaded,
}

/// Build the binding for a valid classification. Cannot fail.
#[must_use]
pub fn synthesize(class: &Classification<'_>) -> GeneratedBinding {
    let entity = class.entity();
    let target_kind = class.target_kind;
    let target_param = &class.target_param().name;

    let copies = entity
        .mapped_fields()
        .map(|field| FieldCopy {
            field: field.ident.clone(),
            column: entity.column_of(field),
        })
        .collect();

    let ret = match (class.returns_target(), target_kind.mutability()) {
        (false, _) => ReturnExpr::Void,
        (true, Mutability::ValueReturning) => ReturnExpr::Threaded,
        (true, Mutability::InPlace) => ReturnExpr::Unchanged,
    };

    GeneratedBinding {
        method: class.signature().name.clone(),
        entity_param: class.entity_param().name.clone(),
        target_param: target_param.clone(),
        target_kind: target_kind.clone(),
        copies,
        ret,
        warning: immutable_void_warning(target_kind, target_param, ret),
    }
}

// a void method on a value-returning target discards every setter result
fn immutable_void_warning(kind: &SettableKind, target: &str, ret: ReturnExpr) -> Option<String> {
    (ret == ReturnExpr::Void && kind.is_value_returning()).then(|| {
        format!(
            "{kind} is immutable, this method will not modify '{target}' in place. \
             It should probably return {kind} rather than void."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn product() -> EntityShape {
        EntityShape::new("Product")
            .with_naming(NamingConvention::SnakeCase)
            .field("id")
            .field("unitPrice")
            .with_field(EntityField::new("description").column("descr"))
            .with_field(EntityField::new("dirty").transient())
    }

    fn signature(kind: SettableKind, returns: bool) -> MethodSignature {
        let ret = if returns {
            ReturnKind::Settable(kind.clone())
        } else {
            ReturnKind::Void
        };

        MethodSignature::new("set")
            .param("entity", TypeKind::Entity(product()))
            .param("target", TypeKind::Settable(kind))
            .returns(ret)
    }

    fn binding(sig: &MethodSignature) -> GeneratedBinding {
        synthesize(&classify(sig).expect("valid signature"))
    }

    #[test]
    fn copies_follow_declaration_order_and_skip_transient() {
        let binding = binding(&signature(SettableKind::UdtValue, false));

        assert_eq!(
            binding.copies,
            [
                FieldCopy {
                    field: "id".into(),
                    column: "id".into()
                },
                FieldCopy {
                    field: "unitPrice".into(),
                    column: "unit_price".into()
                },
                FieldCopy {
                    field: "description".into(),
                    column: "descr".into()
                },
            ]
        );
    }

    #[test]
    fn bound_statement_returned_is_threaded_without_warning() {
        let binding = binding(&signature(SettableKind::BoundStatement, true));

        assert_eq!(binding.ret, ReturnExpr::Threaded);
        assert!(binding.threads_target());
        assert_eq!(binding.warning, None);
    }

    #[test]
    fn bound_statement_void_warns_verbatim() {
        let binding = binding(&signature(SettableKind::BoundStatement, false));

        assert_eq!(binding.ret, ReturnExpr::Void);
        assert_eq!(
            binding.warning.as_deref(),
            Some(
                "BoundStatement is immutable, this method will not modify 'target' in place. \
                 It should probably return BoundStatement rather than void."
            )
        );
    }

    #[test]
    fn in_place_targets_never_warn() {
        for kind in [SettableKind::BoundStatementBuilder, SettableKind::UdtValue] {
            let void = binding(&signature(kind.clone(), false));
            assert_eq!(void.ret, ReturnExpr::Void);
            assert!(!void.has_warning(), "{kind} void must not warn");

            let returned = binding(&signature(kind.clone(), true));
            assert_eq!(returned.ret, ReturnExpr::Unchanged);
            assert!(!returned.has_warning(), "{kind} return must not warn");
        }
    }

    #[test]
    fn custom_value_returning_kind_warns_with_its_own_name() {
        let kind = SettableKind::custom("FrozenRow", Mutability::ValueReturning);
        let binding = binding(&signature(kind, false));

        assert_eq!(
            binding.warning.as_deref(),
            Some(
                "FrozenRow is immutable, this method will not modify 'target' in place. \
                 It should probably return FrozenRow rather than void."
            )
        );
    }

    #[test]
    fn swapped_parameters_produce_the_same_binding() {
        let forward = signature(SettableKind::BoundStatement, true);
        let mut reversed = forward.clone();
        reversed.parameters.reverse();

        assert_eq!(binding(&forward), binding(&reversed));
    }

    #[test]
    fn binding_serializes_without_absent_warning() {
        let binding = binding(&signature(SettableKind::UdtValue, true));
        let json = serde_json::to_value(&binding).expect("serialize binding");

        assert_eq!(json["ret"], "Unchanged");
        assert_eq!(json["target_kind"], "UdtValue");
        assert_eq!(json["copies"][1]["column"], "unit_price");
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn entity_without_mapped_fields_still_synthesizes() {
        let sig = MethodSignature::new("noop")
            .param("e", TypeKind::Entity(EntityShape::new("Empty")))
            .param("t", TypeKind::Settable(SettableKind::BoundStatement))
            .returns(ReturnKind::Settable(SettableKind::BoundStatement));

        let binding = binding(&sig);
        assert!(binding.copies.is_empty());
        assert_eq!(binding.ret, ReturnExpr::Threaded);
    }
}
