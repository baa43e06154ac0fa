use crate::classifier::markers::is_sql_type;
use crate::error::PoetError;
use crate::metadata::descriptors::TypeDescriptor;

/// Native primitive types and the database types they map to.
///
/// `System.Bool` is kept alongside `System.Boolean` for libraries described
/// with the short alias.
pub const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("System.Boolean", "boolean"),
    ("System.Bool", "boolean"),
    ("System.Int16", "smallint"),
    ("System.Int32", "integer"),
    ("System.Int64", "bigint"),
    ("System.Single", "real"),
    ("System.Double", "double precision"),
    ("System.String", "text"),
];

/// Look up a fully-qualified native name in the primitive table.
pub fn primitive_type_name(full_name: &str) -> Option<&'static str> {
    PRIMITIVE_TYPES
        .iter()
        .find(|(native, _)| *native == full_name)
        .map(|(_, sql)| *sql)
}

/// Resolve a type to its database type name.
///
/// SQL-type-marked types resolve to their own native identifier before the
/// primitive table is consulted. Anything else fails; there is no default.
pub fn database_type_name(ty: &TypeDescriptor) -> Result<String, PoetError> {
    if is_sql_type(ty) {
        return Ok(ty.native_name().to_string());
    }

    primitive_type_name(&ty.full_name)
        .map(str::to_string)
        .ok_or_else(|| PoetError::UnsupportedType {
            type_name: ty.full_name.clone(),
        })
}
