use crate::error::BuildError;
use darling::FromMeta;
use setbind_core::schema::prelude::*;
use std::collections::BTreeMap;
use syn::{Attribute, Fields, Item, ItemStruct, Meta};

/// Attribute marking a struct as a mappable entity, and configuring its fields.
pub const ENTITY_ATTR: &str = "entity";

///
/// EntityArgs
/// `#[entity]` or `#[entity(naming = "snake_case")]` on a struct.
///

#[derive(Debug, Default, FromMeta)]
struct EntityArgs {
    #[darling(default)]
    naming: Option<NamingConvention>,
}

///
/// FieldArgs
/// `#[entity(column = "...", transient)]` on a field.
///

#[derive(Debug, Default, FromMeta)]
struct FieldArgs {
    #[darling(default)]
    column: Option<String>,

    #[darling(default)]
    transient: bool,
}

/// Collect every `#[entity]` struct, including those in inline modules,
/// keyed by struct name.
pub(crate) fn discover(items: &[Item]) -> Result<BTreeMap<String, EntityShape>, BuildError> {
    let mut entities = BTreeMap::new();
    discover_into(items, &mut entities)?;

    Ok(entities)
}

fn discover_into(
    items: &[Item],
    entities: &mut BTreeMap<String, EntityShape>,
) -> Result<(), BuildError> {
    for item in items {
        match item {
            Item::Struct(item) => {
                let Some(shape) = entity_shape(item)? else {
                    continue;
                };

                shape.validate().map_err(|errors| BuildError::Schema {
                    entity: shape.name.clone(),
                    errors,
                })?;

                if entities.contains_key(&shape.name) {
                    return Err(BuildError::DuplicateEntity(shape.name));
                }
                entities.insert(shape.name.clone(), shape);
            }
            Item::Mod(module) => {
                if let Some((_, content)) = &module.content {
                    discover_into(content, entities)?;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

// entity_shape
// None when the struct is not an entity
fn entity_shape(item: &ItemStruct) -> Result<Option<EntityShape>, BuildError> {
    let name = item.ident.to_string();
    let Some(attr) = find_attr(&item.attrs) else {
        return Ok(None);
    };

    let args: EntityArgs = parse_args(attr, &name)?;
    let Fields::Named(named) = &item.fields else {
        return Err(BuildError::UnsupportedEntity(name));
    };

    let mut shape = EntityShape::new(&name).with_naming(args.naming.unwrap_or_default());

    for field in &named.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let ident = ident.to_string();

        let mut entity_field = EntityField::new(&ident);
        for attr in field.attrs.iter().filter(|attr| is_entity_attr(attr)) {
            let args: FieldArgs = parse_args(attr, &format!("{name}::{ident}"))?;
            if let Some(column) = args.column {
                entity_field.column = Some(column);
            }
            entity_field.transient |= args.transient;
        }

        shape.fields.push(entity_field);
    }

    Ok(Some(shape))
}

// parse_args
// a bare `#[entity]` means all defaults
fn parse_args<T: FromMeta + Default>(attr: &Attribute, item: &str) -> Result<T, BuildError> {
    match &attr.meta {
        Meta::Path(_) => Ok(T::default()),
        meta => T::from_meta(meta).map_err(|err| BuildError::Attribute {
            item: item.to_string(),
            message: err.to_string(),
        }),
    }
}

fn is_entity_attr(attr: &Attribute) -> bool {
    attr.path().is_ident(ENTITY_ATTR)
}

fn find_attr(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|attr| is_entity_attr(attr))
}

/// Remove `#[entity]` attributes so the declarations compile as plain Rust.
pub(crate) fn strip_attrs(items: &mut [Item]) {
    for item in items {
        match item {
            Item::Struct(item) => {
                item.attrs.retain(|attr| !is_entity_attr(attr));
                for field in &mut item.fields {
                    field.attrs.retain(|attr| !is_entity_attr(attr));
                }
            }
            Item::Mod(module) => {
                if let Some((_, content)) = &mut module.content {
                    strip_attrs(content);
                }
            }
            _ => {}
        }
    }
}
