use std::fmt::Write;
use std::path::Path;

use crate::generator::deploy_plan::DeployPlan;

/// Render the plans of every library as one SQL script.
///
/// Skipped items stay in the script as comments so the gap is visible next
/// to the declarations that did render.
pub fn render_script(plans: &[DeployPlan]) -> String {
    let mut script = String::new();

    for plan in plans {
        writeln!(script, "-- assembly {}", plan.assembly).unwrap();
        writeln!(script).unwrap();

        for item in &plan.items {
            match &item.result {
                Ok(sql) => {
                    writeln!(script, "-- {} {}", item.kind, item.source).unwrap();
                    script.push_str(sql);
                }
                Err(err) => {
                    writeln!(script, "-- skipped {} {}: {err}", item.kind, item.source).unwrap();
                }
            }
            writeln!(script).unwrap();
        }
    }

    script
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("Output path must not be empty".to_string());
    }
    if path.is_dir() {
        return Err(format!(
            "Invalid output path '{}': is a directory",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create output directory: {e}"))?;
    }

    std::fs::write(path, contents).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoetError;
    use crate::generator::deploy_plan::{DeclarationKind, PlannedItem};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_path(prefix: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("{prefix}_{nanos}"))
    }

    fn sample_plan() -> DeployPlan {
        DeployPlan {
            assembly: "Acme.Extensions".to_string(),
            items: vec![
                PlannedItem {
                    kind: DeclarationKind::Function,
                    source: "Acme.Math:Add".to_string(),
                    sql_name: "Add".to_string(),
                    result: Ok("CREATE FUNCTION Add();\n".to_string()),
                },
                PlannedItem {
                    kind: DeclarationKind::Function,
                    source: "Acme.Math:Round".to_string(),
                    sql_name: "Round".to_string(),
                    result: Err(PoetError::UnsupportedType {
                        type_name: "System.Decimal".to_string(),
                    }),
                },
            ],
        }
    }

    #[test]
    fn render_script_keeps_skipped_items_as_comments() {
        let script = render_script(&[sample_plan()]);
        assert_eq!(
            script,
            "-- assembly Acme.Extensions\n\n\
             -- function Acme.Math:Add\nCREATE FUNCTION Add();\n\n\
             -- skipped function Acme.Math:Round: Type System.Decimal is not supported\n\n"
        );
    }

    #[test]
    fn render_script_of_nothing_is_empty() {
        assert!(render_script(&[]).is_empty());
    }

    #[test]
    fn write_output_creates_parent_directories() {
        let dir = unique_path("plmono_formatter_ok");
        let path = dir.join("nested").join("deploy.sql");

        write_output(&path, "SELECT 1;\n").expect("write_output should succeed");

        let written = std::fs::read_to_string(&path).expect("script should exist");
        assert_eq!(written, "SELECT 1;\n");
    }

    #[test]
    fn write_output_rejects_directories() {
        let dir = unique_path("plmono_formatter_dir");
        std::fs::create_dir_all(&dir).expect("should create temp directory");

        let err = write_output(&dir, "SELECT 1;\n").expect_err("directory target should fail");
        assert!(err.contains("is a directory"));
    }

    #[test]
    fn write_output_reports_directory_creation_errors() {
        let blocker = unique_path("plmono_formatter_file");
        std::fs::write(&blocker, "not a directory").expect("should create marker file");

        let err = write_output(&blocker.join("deploy.sql"), "SELECT 1;\n")
            .expect_err("directory creation should fail");
        assert!(err.contains("Failed to create output directory"));
    }
}
