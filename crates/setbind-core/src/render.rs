use crate::synth::{GeneratedBinding, ReturnExpr};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use setbind_schema::{error::SchemaError, validate::validate_ident};
use thiserror::Error as ThisError;

/// Setter method called on the target when none is configured.
pub const DEFAULT_SETTER: &str = "set";

///
/// RenderError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RenderError {
    #[error("cannot render method '{method}': {source}")]
    Ident {
        method: String,
        #[source]
        source: SchemaError,
    },
}

impl GeneratedBinding {
    /// Render the method body as tokens, calling `setter` on the target.
    pub fn render(&self, setter: &str) -> Result<TokenStream, RenderError> {
        let ident = |name: &str| self.ident(name);
        let entity = ident(&self.entity_param)?;
        let target = ident(&self.target_param)?;
        let setter = ident(setter)?;

        let mut body = quote!();

        if self.threads_target() {
            for copy in &self.copies {
                let field = ident(&copy.field)?;
                let column = &copy.column;

                body.extend(quote! {
                    let #target = #target.#setter(#column, &#entity.#field);
                });
            }

            body.extend(match self.ret {
                ReturnExpr::Void => quote!(let _ = #target;),
                ReturnExpr::Threaded | ReturnExpr::Unchanged => quote!(#target),
            });
        } else {
            body.extend(quote! {
                #[allow(unused_mut)]
                let mut #target = #target;
            });

            for copy in &self.copies {
                let field = ident(&copy.field)?;
                let column = &copy.column;

                body.extend(quote! {
                    #target.#setter(#column, &#entity.#field);
                });
            }

            if self.ret != ReturnExpr::Void {
                body.extend(quote!(#target));
            }
        }

        Ok(body)
    }

    // ident
    // raw identifiers keep their r# prefix in the output
    fn ident(&self, name: &str) -> Result<Ident, RenderError> {
        validate_ident(name).map_err(|source| RenderError::Ident {
            method: self.method.clone(),
            source,
        })?;

        Ok(match name.strip_prefix("r#") {
            Some(raw) => Ident::new_raw(raw, Span::call_site()),
            None => Ident::new(name, Span::call_site()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify::classify, synth::synthesize};
    use setbind_schema::prelude::*;

    fn render(kind: SettableKind, returns: bool) -> String {
        let ret = if returns {
            ReturnKind::Settable(kind.clone())
        } else {
            ReturnKind::Void
        };
        let sig = MethodSignature::new("set")
            .param("target", TypeKind::Settable(kind))
            .param(
                "product",
                TypeKind::Entity(
                    EntityShape::new("Product")
                        .field("id")
                        .with_field(EntityField::new("r#type").column("kind")),
                ),
            )
            .returns(ret);

        let class = classify(&sig).expect("valid signature");
        synthesize(&class)
            .render(DEFAULT_SETTER)
            .expect("identifiers are valid")
            .to_string()
    }

    #[test]
    fn value_returning_target_is_threaded_and_returned() {
        let expected = quote! {
            let target = target.set("id", &product.id);
            let target = target.set("kind", &product.r#type);
            target
        };

        assert_eq!(render(SettableKind::BoundStatement, true), expected.to_string());
    }

    #[test]
    fn value_returning_void_discards_final_value() {
        let expected = quote! {
            let target = target.set("id", &product.id);
            let target = target.set("kind", &product.r#type);
            let _ = target;
        };

        assert_eq!(render(SettableKind::BoundStatement, false), expected.to_string());
    }

    #[test]
    fn in_place_target_is_mutated_and_returned_unchanged() {
        let expected = quote! {
            #[allow(unused_mut)]
            let mut target = target;
            target.set("id", &product.id);
            target.set("kind", &product.r#type);
            target
        };

        assert_eq!(render(SettableKind::UdtValue, true), expected.to_string());
    }

    #[test]
    fn in_place_void_has_no_tail_expression() {
        let expected = quote! {
            #[allow(unused_mut)]
            let mut target = target;
            target.set("id", &product.id);
            target.set("kind", &product.r#type);
        };

        assert_eq!(
            render(SettableKind::BoundStatementBuilder, false),
            expected.to_string()
        );
    }

    #[test]
    fn invalid_identifiers_are_reported_not_panicked() {
        let sig = MethodSignature::new("set")
            .param("entity", TypeKind::Entity(EntityShape::new("E").field("not a field")))
            .param("target", TypeKind::Settable(SettableKind::UdtValue));
        let binding = synthesize(&classify(&sig).expect("valid signature"));

        let err = binding.render(DEFAULT_SETTER).expect_err("field ident is invalid");
        assert_eq!(
            err.to_string(),
            "cannot render method 'set': invalid identifier 'not a field': must be an ASCII identifier"
        );
    }
}
