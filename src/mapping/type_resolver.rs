//! Property type resolution
//!
//! Maps a property's declared type onto a CQL [`ColumnType`]. Precedence:
//!
//! 1. An explicit type override wins. Collection overrides must carry exactly
//!    the type arguments their kind needs (1 for list/set, 2 for map), and
//!    every argument must be a native type.
//! 2. Map-like declared types resolve their two generic arguments.
//! 3. List-like and set-like declared types resolve their single argument.
//! 4. Anything else is looked up in the static primitive table.
//!
//! Collection elements must themselves be primitive; nested collections are
//! rejected with a configuration error.

use super::column_type::{primitive_type_for, ColumnType, NativeType, TypeName};
use super::declared_type::{DeclaredType, TypeKind};
use super::errors::MappingError;
use super::property::{MappedProperty, TypeOverride};

/// Resolve the CQL column type of a property
pub fn resolve_column_type(property: &MappedProperty) -> Result<ColumnType, MappingError> {
    if property.is_composite_primary_key() {
        return Err(MappingError::CompositeKeyColumnType {
            property: property.name().to_string(),
            entity: property.owner().to_string(),
        });
    }

    if let Some(type_override) = property.type_override() {
        return resolve_override(property, type_override);
    }

    let declared = property.declared_type();
    match declared.kind() {
        TypeKind::Map => {
            let args = declared.args();
            ensure_type_arguments(property, args.len(), 2)?;
            Ok(ColumnType::Map(
                element_type(property, &args[0])?,
                element_type(property, &args[1])?,
            ))
        }
        TypeKind::List => {
            let args = declared.args();
            ensure_type_arguments(property, args.len(), 1)?;
            Ok(ColumnType::List(element_type(property, &args[0])?))
        }
        TypeKind::Set => {
            let args = declared.args();
            ensure_type_arguments(property, args.len(), 1)?;
            Ok(ColumnType::Set(element_type(property, &args[0])?))
        }
        TypeKind::Simple | TypeKind::CompositeKey => primitive_type_for(declared.name())
            .map(ColumnType::Primitive)
            .ok_or_else(|| MappingError::UnknownType {
                property: property.name().to_string(),
                declared_type: declared.to_string(),
                entity: property.owner().to_string(),
            }),
    }
}

fn resolve_override(
    property: &MappedProperty,
    type_override: &TypeOverride,
) -> Result<ColumnType, MappingError> {
    let args = &type_override.type_arguments;

    match type_override.type_name {
        TypeName::Native(native) => Ok(ColumnType::Primitive(native)),
        TypeName::Map => {
            ensure_type_arguments(property, args.len(), 2)?;
            Ok(ColumnType::Map(
                native_argument(property, args[0])?,
                native_argument(property, args[1])?,
            ))
        }
        TypeName::List => {
            ensure_type_arguments(property, args.len(), 1)?;
            Ok(ColumnType::List(native_argument(property, args[0])?))
        }
        TypeName::Set => {
            ensure_type_arguments(property, args.len(), 1)?;
            Ok(ColumnType::Set(native_argument(property, args[0])?))
        }
    }
}

/// Element type of a declared collection; must be a table primitive
fn element_type(property: &MappedProperty, arg: &DeclaredType) -> Result<NativeType, MappingError> {
    if arg.is_collection() || arg.is_composite_key() {
        return Err(non_primitive_element(property));
    }
    primitive_type_for(arg.name()).ok_or_else(|| non_primitive_element(property))
}

fn native_argument(property: &MappedProperty, arg: TypeName) -> Result<NativeType, MappingError> {
    match arg {
        TypeName::Native(native) => Ok(native),
        _ => Err(non_primitive_element(property)),
    }
}

fn ensure_type_arguments(
    property: &MappedProperty,
    found: usize,
    expected: usize,
) -> Result<(), MappingError> {
    if found != expected {
        return Err(MappingError::TypeArgumentCount {
            property: property.name().to_string(),
            declared_type: describe_type(property),
            entity: property.owner().to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn non_primitive_element(property: &MappedProperty) -> MappingError {
    MappingError::NonPrimitiveElement {
        property: property.name().to_string(),
        declared_type: describe_type(property),
        entity: property.owner().to_string(),
    }
}

fn describe_type(property: &MappedProperty) -> String {
    match property.type_override() {
        Some(o) if o.type_arguments.is_empty() => o.type_name.to_string(),
        Some(o) => {
            let args: Vec<&str> = o.type_arguments.iter().map(|a| a.as_str()).collect();
            format!("{}<{}>", o.type_name, args.join(", "))
        }
        None => property.declared_type().to_string(),
    }
}
