/// Marker queries: SQL type, aggregate, function and trigger classification plus display names.
pub mod markers;
