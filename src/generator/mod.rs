/// `CREATE FUNCTION`, `CREATE TYPE`, `CREATE AGGREGATE` and trigger rendering.
pub mod declarations;
/// Per-library declaration planning: dependency ordering and per-item outcomes.
pub mod deploy_plan;
/// Native type to database type resolution.
pub mod type_mapping;
