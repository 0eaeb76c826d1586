use crate::{
    classify::classify,
    diagnostic::Diagnostic,
    synth::{GeneratedBinding, synthesize},
};
use setbind_schema::signature::MethodSignature;
use tracing::{debug, warn};

///
/// MethodOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MethodOutcome {
    Generated(GeneratedBinding),
    Rejected(Diagnostic),
}

///
/// MethodReport
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodReport {
    pub method: String,
    pub outcome: MethodOutcome,
}

impl MethodReport {
    #[must_use]
    pub const fn binding(&self) -> Option<&GeneratedBinding> {
        match &self.outcome {
            MethodOutcome::Generated(binding) => Some(binding),
            MethodOutcome::Rejected(_) => None,
        }
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self.outcome, MethodOutcome::Rejected(_))
    }

    /// The rejection, or the warning attached to a generated binding.
    #[must_use]
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match &self.outcome {
            MethodOutcome::Generated(binding) => binding
                .warning
                .as_ref()
                .map(|msg| Diagnostic::warning(&self.method, msg)),
            MethodOutcome::Rejected(diag) => Some(diag.clone()),
        }
    }
}

/// Classify one method and, if it is legal, synthesize its body.
#[must_use]
pub fn process_method(signature: &MethodSignature) -> MethodReport {
    let method = signature.name.clone();

    let outcome = match classify(signature) {
        Ok(class) => {
            let binding = synthesize(&class);

            if let Some(msg) = &binding.warning {
                warn!(method = %method, warning = %msg, "binding method generated with warning");
            } else {
                debug!(
                    method = %method,
                    target = %binding.target_kind,
                    copies = binding.copies.len(),
                    "binding method generated"
                );
            }

            MethodOutcome::Generated(binding)
        }
        Err(err) => {
            warn!(method = %method, error = %err, "binding method rejected");

            MethodOutcome::Rejected(Diagnostic::error(&method, err.to_string()))
        }
    };

    MethodReport { method, outcome }
}

/// Process every method independently, in the order given. A rejected
/// method never affects the others.
#[must_use]
pub fn process_methods<'a, I>(signatures: I) -> Vec<MethodReport>
where
    I: IntoIterator<Item = &'a MethodSignature>,
{
    signatures.into_iter().map(process_method).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagnostic::Severity, synth::ReturnExpr};
    use setbind_schema::prelude::*;

    fn entity() -> TypeKind {
        TypeKind::Entity(EntityShape::new("Product").field("id"))
    }

    #[test]
    fn rejected_method_does_not_stop_the_others() {
        let sigs = [
            MethodSignature::new("bad").param("a", TypeKind::Other("String".into())),
            MethodSignature::new("good")
                .param("entity", entity())
                .param("builder", TypeKind::Settable(SettableKind::BoundStatementBuilder)),
        ];

        let reports = process_methods(&sigs);

        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_rejected());
        assert_eq!(
            reports[0].diagnostic(),
            Some(Diagnostic::error(
                "bad",
                "Wrong number of parameters: binding methods must have two"
            ))
        );

        let binding = reports[1].binding().expect("good method is generated");
        assert_eq!(binding.ret, ReturnExpr::Void);
        assert_eq!(reports[1].diagnostic(), None);
    }

    #[test]
    fn warning_is_reported_alongside_the_binding() {
        let sig = MethodSignature::new("bind")
            .param("entity", entity())
            .param("stmt", TypeKind::Settable(SettableKind::BoundStatement));

        let report = process_method(&sig);
        let diag = report.diagnostic().expect("void BoundStatement warns");

        assert!(report.binding().is_some());
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.method, "bind");
        assert!(diag.message.contains("will not modify 'stmt' in place"));
    }

    #[test]
    fn output_order_follows_input_order() {
        let sigs: Vec<_> = ["c", "a", "b"]
            .into_iter()
            .map(MethodSignature::new)
            .collect();

        let names: Vec<_> = process_methods(&sigs)
            .into_iter()
            .map(|report| report.method)
            .collect();

        assert_eq!(names, ["c", "a", "b"]);
    }
}
