use thiserror::Error;

/// Failure raised while translating library metadata into DDL.
///
/// Every variant describes a problem with a single type or method; callers
/// record it for that item and move on to the next candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoetError {
    /// The type is neither marked as a SQL type nor present in the primitive table.
    #[error("Type {type_name} is not supported")]
    UnsupportedType {
        /// Fully-qualified native name of the offending type.
        type_name: String,
    },

    /// A composite type lacks its parse or stringify method.
    #[error("Type {type_name} has no conversion method '{method}'")]
    MissingConversionMethod {
        /// Fully-qualified native name of the composite type.
        type_name: String,
        /// Native name of the missing method.
        method: String,
    },

    /// More than one method carries a well-known conversion or step name.
    #[error("Type {type_name} declares more than one method named '{method}'")]
    AmbiguousMethod {
        /// Fully-qualified native name of the declaring type.
        type_name: String,
        /// Native name shared by the candidate methods.
        method: String,
    },

    /// An aggregate type lacks its step method.
    #[error("Aggregate {type_name} has no step method '{method}'")]
    MissingAggregateMethod {
        /// Fully-qualified native name of the aggregate type.
        type_name: String,
        /// Native name of the missing step method.
        method: String,
    },

    /// The aggregate step method is not shaped `(state, value) -> state`.
    #[error("Aggregate {type_name} has an invalid step method: {reason}")]
    InvalidAggregateStep {
        /// Fully-qualified native name of the aggregate type.
        type_name: String,
        /// Human-readable description of the mismatch.
        reason: String,
    },

    /// Trigger functions are invoked without explicit arguments.
    #[error("Trigger method {method} must not declare parameters (found {count})")]
    TriggerArguments {
        /// Dispatch handle of the trigger method.
        method: String,
        /// Number of declared parameters.
        count: usize,
    },

    /// Composite types whose conversion methods reference each other in a loop.
    #[error("Cyclic composite type definition: {}", cycle.join(" -> "))]
    CyclicTypeDefinition {
        /// Qualified type names along the cycle, first name repeated at the end.
        cycle: Vec<String>,
    },

    /// A composite type references a composite type that was not declared.
    #[error("Type {type_name} depends on {dependency}, which was not declared")]
    UndeclaredDependency {
        /// Fully-qualified native name of the dependent type.
        type_name: String,
        /// Fully-qualified native name of the skipped dependency.
        dependency: String,
    },

    /// A library manifest could not be read or is malformed.
    #[error("Failed to load {source_name}: {reason}")]
    Manifest {
        /// File name or label of the manifest.
        source_name: String,
        /// Human-readable description of the failure.
        reason: String,
    },
}
