/// Separator between a declaring type and its nested type in qualified names.
pub const NESTED_TYPE_SEPARATOR: char = '+';

/// Return the native identifier of a type from its fully-qualified name.
///
/// Examples:
/// - `"Acme.Geo.Point"` -> `"Point"`
/// - `"Acme.Outer+Inner"` -> `"Inner"`
/// - `"Point"` -> `"Point"`
pub fn native_identifier(full_name: &str) -> &str {
    let trimmed = full_name.trim();
    trimmed
        .rsplit(['.', NESTED_TYPE_SEPARATOR])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(trimmed)
}

/// Build the `Type:Method` string the call handler uses to locate an implementation.
pub fn dispatch_handle(declaring_type: &str, method_name: &str) -> String {
    format!("{declaring_type}:{method_name}")
}

/// Prefix a dispatch handle with its assembly, as in `Acme.Ext, Acme.Math:Add`.
pub fn assembly_qualified_handle(assembly: &str, handle: &str) -> String {
    format!("{assembly}, {handle}")
}
