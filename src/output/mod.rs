/// Renders deploy plans as a SQL script and writes it to disk.
pub mod formatter;
/// Builds a Markdown summary of rendered and skipped declarations.
pub mod report;
