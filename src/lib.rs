//! Generate `PostgreSQL` DDL registering PL/Mono types, functions, aggregates and triggers.
#![warn(missing_docs)]

/// Marker classification: SQL type, aggregate, function and trigger queries.
pub mod classifier;
/// Typed failures raised while translating metadata into DDL.
pub mod error;
/// Type resolution, declaration rendering and per-library planning.
pub mod generator;
/// Library metadata: descriptors, manifests and name helpers.
pub mod metadata;
/// Script and report output.
pub mod output;

pub use error::PoetError;
