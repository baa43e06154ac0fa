use crate::metadata::descriptors::{Marker, MarkerKind, MethodDescriptor, TypeDescriptor};

fn find_marker(markers: &[Marker], kind: MarkerKind) -> Option<&Marker> {
    markers.iter().find(|marker| marker.kind == kind)
}

fn display_name_or(markers: &[Marker], kind: MarkerKind, native: &str) -> String {
    find_marker(markers, kind)
        .and_then(Marker::display_name)
        .unwrap_or(native)
        .to_string()
}

/// Check if a type is a database-visible scalar type.
pub fn is_sql_type(ty: &TypeDescriptor) -> bool {
    find_marker(&ty.markers, MarkerKind::SqlType).is_some()
}

/// Check if a type implements an aggregate.
pub fn is_sql_aggregate(ty: &TypeDescriptor) -> bool {
    find_marker(&ty.markers, MarkerKind::SqlAggregate).is_some()
}

/// Check if a method is a callable SQL function.
pub fn is_sql_function(method: &MethodDescriptor) -> bool {
    find_marker(&method.markers, MarkerKind::SqlFunction).is_some()
}

/// Check if a method is a trigger function.
pub fn is_sql_trigger(method: &MethodDescriptor) -> bool {
    find_marker(&method.markers, MarkerKind::SqlTrigger).is_some()
}

/// SQL-visible name of a function.
///
/// The first `SqlFunction` marker's override wins when non-empty; otherwise,
/// and when the method carries no such marker at all, the native method name.
pub fn resolved_name(method: &MethodDescriptor) -> String {
    display_name_or(&method.markers, MarkerKind::SqlFunction, &method.name)
}

/// SQL-visible name of a trigger function (`SqlTrigger` override, else native name).
pub fn resolved_trigger_name(method: &MethodDescriptor) -> String {
    display_name_or(&method.markers, MarkerKind::SqlTrigger, &method.name)
}

/// SQL-visible name of an aggregate (`SqlAggregate` override, else native identifier).
pub fn resolved_aggregate_name(ty: &TypeDescriptor) -> String {
    display_name_or(&ty.markers, MarkerKind::SqlAggregate, ty.native_name())
}
