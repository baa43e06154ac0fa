/// Type, method, parameter and marker descriptors.
pub mod descriptors;
/// JSON library manifests: the metadata provider for compiled libraries.
pub mod manifest;
/// Qualified-name helpers (native identifiers, dispatch handles).
pub mod names;
