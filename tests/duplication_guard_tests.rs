use std::fs;

fn read(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

/// Source text above the unit test module.
fn production_source(path: &str) -> String {
    let source = read(path);
    match source.find("#[cfg(test)]") {
        Some(end) => source[..end].to_string(),
        None => source,
    }
}

#[test]
fn function_rendering_has_single_source_of_truth() {
    let files = [
        "src/generator/declarations.rs",
        "src/generator/deploy_plan.rs",
        "src/output/formatter.rs",
    ];

    let templates = files
        .iter()
        .map(|path| production_source(path).matches("\"CREATE FUNCTION ").count())
        .sum::<usize>();

    assert_eq!(
        templates, 1,
        "expected a single CREATE FUNCTION template, found {templates}"
    );
}

#[test]
fn primitive_type_table_is_declared_once() {
    let files = [
        "src/generator/type_mapping.rs",
        "src/generator/declarations.rs",
        "src/generator/deploy_plan.rs",
    ];

    let tables = files
        .iter()
        .map(|path| production_source(path).matches("\"System.Int32\", \"integer\"").count())
        .sum::<usize>();

    assert_eq!(tables, 1, "expected one primitive mapping table, found {tables}");
}
