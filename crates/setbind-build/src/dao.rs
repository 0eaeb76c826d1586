use crate::{
    config::BuildConfig,
    resolve::{Passing, TypeResolver},
};
use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, quote};
use setbind_core::{
    Diagnostic, GeneratedBinding, MethodOutcome, ReturnExpr, process_method,
    schema::{prelude::*, validate::validate_ident},
};
use syn::{FnArg, Item, ItemTrait, Pat, Signature, TraitItem, TraitItemFn};
use tracing::{debug, warn};

/// Attribute marking a trait method as a binding method.
pub const SET_ENTITY_ATTR: &str = "set_entity";

///
/// DaoBuilder
///
/// Walks declared traits, synthesizes every `#[set_entity]` method and
/// places a generated implementation right after each trait.
///

pub(crate) struct DaoBuilder<'a> {
    config: &'a BuildConfig,
    resolver: TypeResolver<'a>,
}

impl<'a> DaoBuilder<'a> {
    pub(crate) const fn new(config: &'a BuildConfig, resolver: TypeResolver<'a>) -> Self {
        Self { config, resolver }
    }

    /// Expand every binding trait in `items` (recursing into inline modules)
    /// and return all diagnostics in declaration order.
    pub(crate) fn expand(&self, items: &mut Vec<Item>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut expanded = Vec::with_capacity(items.len());

        for mut item in items.drain(..) {
            let mut generated = None;

            match &mut item {
                Item::Trait(item_trait) => {
                    generated = self.expand_trait(item_trait, &mut diagnostics);
                }
                Item::Mod(module) => {
                    if let Some((_, content)) = &mut module.content {
                        diagnostics.extend(self.expand(content));
                    }
                }
                _ => {}
            }

            expanded.push(item);
            if let Some(tokens) = generated {
                expanded.push(Item::Verbatim(tokens));
            }
        }

        *items = expanded;
        diagnostics
    }

    // expand_trait
    // None when the trait has no binding methods or any of them failed
    fn expand_trait(
        &self,
        item: &mut ItemTrait,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TokenStream> {
        let trait_name = item.ident.to_string();
        let methods = take_binding_methods(item);
        if methods.is_empty() {
            return None;
        }

        let mut failed = false;
        let mut trait_error = |message: String| {
            failed = true;
            diagnostics.push(Diagnostic::error(&trait_name, message));
        };

        if !item.generics.params.is_empty() {
            trait_error("generic traits cannot declare binding methods".to_string());
        }
        if !item.supertraits.is_empty() {
            trait_error("traits with supertraits cannot declare binding methods".to_string());
        }
        for name in required_items(item, &methods) {
            trait_error(format!(
                "trait item '{name}' has no default and is not a binding method, \
                 so the generated implementation cannot provide it"
            ));
        }
        let impl_ident = match impl_ident(&item.ident, &self.config.dao_suffix) {
            Ok(ident) => Some(ident),
            Err(err) => {
                trait_error(format!("cannot name the implementation struct: {err}"));
                None
            }
        };

        let mut fns = Vec::with_capacity(methods.len());

        for method in &methods {
            let name = format!("{trait_name}::{}", method.sig.ident);

            match self.expand_method(&name, &method.sig) {
                Ok((tokens, warning)) => {
                    fns.push(tokens);
                    if let Some(diag) = warning {
                        let diag = if self.config.deny_warnings {
                            failed = true;
                            diag.deny()
                        } else {
                            diag
                        };
                        diagnostics.push(diag);
                    }
                }
                Err(diag) => {
                    failed = true;
                    diagnostics.push(diag);
                }
            }
        }

        let Some(impl_ident) = impl_ident.filter(|_| !failed) else {
            warn!(
                trait_name = %trait_name,
                "skipping implementation of trait with rejected binding methods"
            );
            return None;
        };

        debug!(trait_name = %trait_name, methods = fns.len(), "generated binding implementation");

        let trait_ident = &item.ident;
        let vis = &item.vis;
        let unsafety = &item.unsafety;

        Some(quote! {
            #[derive(Clone, Copy, Debug, Default)]
            #vis struct #impl_ident;

            #unsafety impl #trait_ident for #impl_ident {
                #(#fns)*
            }
        })
    }

    // expand_method
    // Ok carries the generated fn and an optional warning
    fn expand_method(
        &self,
        name: &str,
        sig: &Signature,
    ) -> Result<(TokenStream, Option<Diagnostic>), Diagnostic> {
        let (signature, passing) = self.signature(name, sig)?;

        let report = process_method(&signature);
        let warning = report.diagnostic().filter(|diag| !diag.is_error());
        let binding = match report.outcome {
            MethodOutcome::Generated(binding) => binding,
            MethodOutcome::Rejected(diag) => return Err(diag),
        };

        let target_passing = passing
            .iter()
            .find(|(param, _)| *param == binding.target_param)
            .map_or(Passing::Owned, |(_, how)| *how);
        check_target_passing(&binding, target_passing)
            .map_err(|msg| Diagnostic::error(name, msg))?;

        let body = binding
            .render(&self.config.setter)
            .map_err(|err| Diagnostic::error(name, err.to_string()))?;

        Ok((quote!(#sig { #body }), warning))
    }

    // signature
    // resolve declared parameters; the receiver is not a declared parameter
    fn signature(
        &self,
        name: &str,
        sig: &Signature,
    ) -> Result<(MethodSignature, Vec<(String, Passing)>), Diagnostic> {
        let mut signature = MethodSignature::new(name);
        let mut passing = Vec::new();

        for input in &sig.inputs {
            let FnArg::Typed(arg) = input else {
                continue;
            };
            let Pat::Ident(pat) = arg.pat.as_ref() else {
                return Err(Diagnostic::error(
                    name,
                    "binding method parameters must be plain identifiers",
                ));
            };
            if pat.by_ref.is_some() || pat.subpat.is_some() {
                return Err(Diagnostic::error(
                    name,
                    format!("parameter '{}' must be a plain identifier", pat.ident),
                ));
            }

            let param = pat.ident.to_string();
            let (kind, how) = self.resolver.resolve(&arg.ty);
            signature = signature.param(param.clone(), kind);
            passing.push((param, how));
        }

        let signature = signature.returns(self.resolver.resolve_return(&sig.output));

        Ok((signature, passing))
    }
}

// a borrowed target can only be mutated in place, and never returned
fn check_target_passing(binding: &GeneratedBinding, passing: Passing) -> Result<(), String> {
    let target = &binding.target_param;
    let kind = &binding.target_kind;

    match (passing, binding.threads_target(), binding.ret) {
        (Passing::Owned, _, _) | (Passing::Mutable, false, ReturnExpr::Void) => Ok(()),
        (_, true, _) => Err(format!(
            "settable parameter '{target}' must be taken by value: {kind} is immutable and every setter returns a new value"
        )),
        (Passing::Shared, false, ReturnExpr::Void) => Err(format!(
            "settable parameter '{target}' must be taken by value or by mutable reference to be modified in place"
        )),
        (_, false, _) => Err(format!(
            "settable parameter '{target}' must be taken by value to be returned as {kind}"
        )),
    }
}

// impl_ident
// the struct name is the trait name (without r#) plus the configured suffix
fn impl_ident(trait_ident: &Ident, suffix: &str) -> Result<Ident, SchemaError> {
    let trait_name = trait_ident.to_string();
    let trait_name = trait_name.strip_prefix("r#").unwrap_or(&trait_name);
    let name = format!("{trait_name}{suffix}");

    validate_ident(&name)?;
    if name.starts_with("r#") {
        return Err(SchemaError::InvalidIdent {
            ident: name,
            reason: "must be an ASCII identifier".to_string(),
        });
    }

    Ok(Ident::new(&name, Span::call_site()))
}

// required_items
// names of trait items the generated impl would have to provide but cannot
fn required_items(item: &ItemTrait, methods: &[TraitItemFn]) -> Vec<String> {
    let is_binding = |ident: &Ident| methods.iter().any(|method| method.sig.ident == *ident);

    item.items
        .iter()
        .filter_map(|trait_item| match trait_item {
            TraitItem::Fn(method) => (method.default.is_none()
                && !is_binding(&method.sig.ident))
            .then(|| method.sig.ident.to_string()),
            TraitItem::Type(ty) if ty.default.is_none() => Some(ty.ident.to_string()),
            TraitItem::Const(constant) if constant.default.is_none() => {
                Some(constant.ident.to_string())
            }
            TraitItem::Macro(mac) => Some(mac.mac.path.to_token_stream().to_string()),
            _ => None,
        })
        .collect()
}

// take_binding_methods
// strips the marker attribute and returns the marked methods
fn take_binding_methods(item: &mut ItemTrait) -> Vec<TraitItemFn> {
    let mut methods = Vec::new();

    for trait_item in &mut item.items {
        let TraitItem::Fn(method) = trait_item else {
            continue;
        };

        let before = method.attrs.len();
        method
            .attrs
            .retain(|attr| !attr.path().is_ident(SET_ENTITY_ATTR));
        if method.attrs.len() == before {
            continue;
        }

        methods.push(method.clone());
    }

    methods
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::call_site())
    }

    #[test]
    fn impl_ident_appends_suffix_to_unraw_trait_name() {
        let raw = Ident::new_raw("Dao", Span::call_site());

        let plain = impl_ident(&ident("ProductDao"), "Impl").expect("valid");

        assert_eq!(plain.to_string(), "ProductDaoImpl");
        assert_eq!(impl_ident(&raw, "Impl").expect("valid").to_string(), "DaoImpl");
    }

    #[test]
    fn impl_ident_rejects_names_that_are_not_plain_identifiers() {
        let cases = [("ProductDao", "Impl-v2"), ("r", "#Dao"), ("Product", " Dao")];

        for (trait_name, suffix) in cases {
            assert!(
                impl_ident(&ident(trait_name), suffix).is_err(),
                "'{trait_name}{suffix}' should fail"
            );
        }
    }
}
