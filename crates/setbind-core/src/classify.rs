use setbind_schema::prelude::*;
use thiserror::Error as ThisError;

///
/// ClassifyError
///
/// Fatal rejection of a declared binding method. The display strings are the
/// user-facing diagnostics and depend only on the signature.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ClassifyError {
    #[error("Wrong number of parameters: binding methods must have two")]
    WrongParameterCount { found: usize },

    #[error(
        "Wrong parameter types: binding methods must take a settable target and an annotated entity (in any order)"
    )]
    WrongParameterTypes,

    #[error(
        "Invalid return type: binding methods must either be void, or return the same type as their settable parameter (in this case, {expected} to match '{param}')"
    )]
    InvalidReturnType {
        expected: SettableKind,
        param: String,
        found: ReturnKind,
    },
}

///
/// Classification
///
/// A signature accepted as a binding method, with the role of each declared
/// parameter. Borrows the signature it was computed from, so it can only be
/// synthesized against that signature.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Classification<'a> {
    pub entity_index: usize,
    pub target_index: usize,
    pub target_kind: &'a SettableKind,

    signature: &'a MethodSignature,
    entity: &'a EntityShape,
}

impl<'a> Classification<'a> {
    #[must_use]
    pub const fn signature(&self) -> &'a MethodSignature {
        self.signature
    }

    #[must_use]
    pub const fn entity(&self) -> &'a EntityShape {
        self.entity
    }

    #[must_use]
    pub fn entity_param(&self) -> &'a Parameter {
        &self.signature.parameters[self.entity_index]
    }

    #[must_use]
    pub fn target_param(&self) -> &'a Parameter {
        &self.signature.parameters[self.target_index]
    }

    /// Whether the method hands the target back to the caller.
    #[must_use]
    pub const fn returns_target(&self) -> bool {
        !self.signature.return_kind.is_void()
    }
}

/// Decide whether `signature` is a legal binding method.
pub fn classify(signature: &MethodSignature) -> Result<Classification<'_>, ClassifyError> {
    let [first, second] = signature.parameters.as_slice() else {
        return Err(ClassifyError::WrongParameterCount {
            found: signature.parameters.len(),
        });
    };

    // roles may appear in either order
    let (entity_index, entity, target_index, target_kind) = match (&first.kind, &second.kind) {
        (TypeKind::Entity(entity), TypeKind::Settable(kind)) => (0, entity, 1, kind),
        (TypeKind::Settable(kind), TypeKind::Entity(entity)) => (1, entity, 0, kind),
        _ => return Err(ClassifyError::WrongParameterTypes),
    };

    match &signature.return_kind {
        ReturnKind::Void => {}
        ReturnKind::Settable(kind) if kind == target_kind => {}
        other => {
            return Err(ClassifyError::InvalidReturnType {
                expected: target_kind.clone(),
                param: signature.parameters[target_index].name.clone(),
                found: other.clone(),
            });
        }
    }

    Ok(Classification {
        entity_index,
        target_index,
        target_kind,
        signature,
        entity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> TypeKind {
        TypeKind::Entity(EntityShape::new("Product").field("id").field("name"))
    }

    fn settable(kind: SettableKind) -> TypeKind {
        TypeKind::Settable(kind)
    }

    fn other(name: &str) -> TypeKind {
        TypeKind::Other(name.to_string())
    }

    #[test]
    fn rejects_one_and_three_parameters() {
        let one = MethodSignature::new("set").param("a", other("String"));
        let three = MethodSignature::new("set")
            .param("a", other("String"))
            .param("b", other("String"))
            .param("c", other("String"));

        for sig in [one, three] {
            let err = classify(&sig).expect_err("parameter count is wrong");
            assert_eq!(
                err.to_string(),
                "Wrong number of parameters: binding methods must have two"
            );
        }
    }

    #[test]
    fn rejects_parameters_that_are_not_entity_and_target() {
        let cases = [
            (entity(), other("i32")),
            (other("String"), settable(SettableKind::BoundStatement)),
            (other("String"), other("String")),
            (entity(), entity()),
            (
                settable(SettableKind::UdtValue),
                settable(SettableKind::BoundStatement),
            ),
        ];

        for (a, b) in cases {
            let sig = MethodSignature::new("set").param("entity", a).param("target", b);
            assert_eq!(
                classify(&sig),
                Err(ClassifyError::WrongParameterTypes),
                "{sig:?}"
            );
        }
    }

    #[test]
    fn rejects_non_settable_return_naming_expected_type() {
        let sig = MethodSignature::new("set")
            .param("entity", entity())
            .param("target", settable(SettableKind::BoundStatement))
            .returns(ReturnKind::Other("i32".into()));

        let err = classify(&sig).expect_err("i32 is not a valid return type");
        assert_eq!(
            err.to_string(),
            "Invalid return type: binding methods must either be void, or return the same type \
             as their settable parameter (in this case, BoundStatement to match 'target')"
        );
    }

    #[test]
    fn rejects_different_settable_return() {
        let sig = MethodSignature::new("set")
            .param("entity", entity())
            .param("stmt", settable(SettableKind::BoundStatement))
            .returns(ReturnKind::Settable(SettableKind::UdtValue));

        let err = classify(&sig).expect_err("UdtValue does not match BoundStatement");
        assert!(
            err.to_string()
                .ends_with("(in this case, BoundStatement to match 'stmt')"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn custom_kinds_must_match_on_mutability_too() {
        let declared = SettableKind::custom("Row", Mutability::InPlace);
        let sig = MethodSignature::new("set")
            .param("entity", entity())
            .param("row", settable(declared))
            .returns(ReturnKind::Settable(SettableKind::custom(
                "Row",
                Mutability::ValueReturning,
            )));

        assert!(matches!(
            classify(&sig),
            Err(ClassifyError::InvalidReturnType { .. })
        ));
    }

    #[test]
    fn accepts_reversed_parameter_order() {
        let sig = MethodSignature::new("set")
            .param("target", settable(SettableKind::BoundStatement))
            .param("entity", entity())
            .returns(ReturnKind::Settable(SettableKind::BoundStatement));

        let class = classify(&sig).expect("reversed order is valid");

        assert_eq!(class.entity_index, 1);
        assert_eq!(class.target_index, 0);
        assert_eq!(class.target_kind, &SettableKind::BoundStatement);
        assert_eq!(class.target_param().name, "target");
        assert_eq!(class.entity_param().name, "entity");
        assert!(class.returns_target());
    }

    #[test]
    fn void_is_accepted_for_every_builtin() {
        for kind in SettableKind::BUILTINS {
            let sig = MethodSignature::new("set")
                .param("entity", entity())
                .param("target", settable(kind.clone()));

            let class = classify(&sig).expect("void is always accepted");
            assert_eq!(class.target_kind, &kind);
            assert!(!class.returns_target());
            assert_eq!(class.entity().name, "Product");
        }
    }
}
