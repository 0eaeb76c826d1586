use quote::ToTokens;
use setbind_core::schema::prelude::*;
use std::collections::BTreeMap;
use syn::{ReturnType, Type};

///
/// Passing
/// How a parameter is handed to the method.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Passing {
    Owned,
    Shared,
    Mutable,
}

///
/// TypeResolver
///
/// Maps declared Rust types onto `TypeKind`s by their last path segment.
/// Registered custom settables shadow built-ins of the same name.
///

pub(crate) struct TypeResolver<'a> {
    entities: &'a BTreeMap<String, EntityShape>,
    customs: &'a [SettableKind],
}

impl<'a> TypeResolver<'a> {
    pub(crate) const fn new(
        entities: &'a BTreeMap<String, EntityShape>,
        customs: &'a [SettableKind],
    ) -> Self {
        Self { entities, customs }
    }

    pub(crate) fn resolve(&self, ty: &Type) -> (TypeKind, Passing) {
        let (ty, passing) = peel_reference(ty);

        (self.resolve_owned(ty), passing)
    }

    pub(crate) fn resolve_return(&self, output: &ReturnType) -> ReturnKind {
        let ReturnType::Type(_, ty) = output else {
            return ReturnKind::Void;
        };

        match peel_groups(ty) {
            Type::Tuple(tuple) if tuple.elems.is_empty() => ReturnKind::Void,
            ty @ Type::Path(_) => match self.resolve_owned(ty) {
                TypeKind::Settable(kind) => ReturnKind::Settable(kind),
                TypeKind::Entity(_) | TypeKind::Other(_) => ReturnKind::Other(type_name(ty)),
            },
            // borrowed returns can never hand back the target
            ty => ReturnKind::Other(type_name(ty)),
        }
    }

    fn resolve_owned(&self, ty: &Type) -> TypeKind {
        let Some(name) = last_segment(ty) else {
            return TypeKind::Other(type_name(ty));
        };

        if let Some(entity) = self.entities.get(&name) {
            return TypeKind::Entity(entity.clone());
        }
        if let Some(kind) = self.customs.iter().find(|kind| kind.name() == name) {
            return TypeKind::Settable(kind.clone());
        }
        if let Some(kind) = SettableKind::builtin(&name) {
            return TypeKind::Settable(kind);
        }

        TypeKind::Other(type_name(ty))
    }
}

fn peel_groups(mut ty: &Type) -> &Type {
    loop {
        match ty {
            Type::Paren(inner) => ty = &inner.elem,
            Type::Group(inner) => ty = &inner.elem,
            _ => return ty,
        }
    }
}

fn peel_reference(ty: &Type) -> (&Type, Passing) {
    match peel_groups(ty) {
        Type::Reference(reference) => {
            let passing = if reference.mutability.is_some() {
                Passing::Mutable
            } else {
                Passing::Shared
            };

            (peel_groups(&reference.elem), passing)
        }
        ty => (ty, Passing::Owned),
    }
}

// last_segment
// generic types (Option<T>, Vec<T>) never resolve to an entity or target
fn last_segment(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    path.path
        .segments
        .last()
        .filter(|segment| segment.arguments.is_none())
        .map(|segment| segment.ident.to_string())
}

fn type_name(ty: &Type) -> String {
    ty.to_token_stream().to_string()
}
