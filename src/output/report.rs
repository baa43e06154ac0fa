use std::fmt::Write;

use crate::generator::deploy_plan::DeployPlan;

/// Build a markdown report with one row per planned declaration.
pub fn build_report(plans: &[DeployPlan]) -> String {
    let mut report = String::new();

    writeln!(report, "# plmono-deploy Report").unwrap();
    writeln!(report).unwrap();

    let total: usize = plans.iter().map(|p| p.items.len()).sum();
    let skipped: usize = plans.iter().map(|p| p.failures().count()).sum();
    writeln!(
        report,
        "{} declarations planned, {} rendered, {} skipped.",
        total,
        total - skipped,
        skipped
    )
    .unwrap();

    for plan in plans {
        writeln!(report).unwrap();
        writeln!(report, "## {}", plan.assembly).unwrap();
        writeln!(report).unwrap();
        writeln!(report, "| Kind | Source | SQL name | Status |").unwrap();
        writeln!(report, "|------|--------|----------|--------|").unwrap();

        for item in &plan.items {
            let status = match &item.result {
                Ok(_) => "ok".to_string(),
                Err(err) => format!("skipped: {err}"),
            };
            writeln!(
                report,
                "| {} | `{}` | `{}` | {} |",
                item.kind, item.source, item.sql_name, status
            )
            .unwrap();
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoetError;
    use crate::generator::deploy_plan::{DeclarationKind, PlannedItem};

    #[test]
    fn report_counts_and_lists_items() {
        let plan = DeployPlan {
            assembly: "Acme.Geo".to_string(),
            items: vec![
                PlannedItem {
                    kind: DeclarationKind::Type,
                    source: "Acme.Geo.Point".to_string(),
                    sql_name: "Point".to_string(),
                    result: Ok("CREATE TYPE Point;\n".to_string()),
                },
                PlannedItem {
                    kind: DeclarationKind::Aggregate,
                    source: "Acme.Geo.Centroid".to_string(),
                    sql_name: "Centroid".to_string(),
                    result: Err(PoetError::MissingAggregateMethod {
                        type_name: "Acme.Geo.Centroid".to_string(),
                        method: "Accumulate".to_string(),
                    }),
                },
            ],
        };

        let report = build_report(&[plan]);
        assert!(report.starts_with("# plmono-deploy Report\n"));
        assert!(report.contains("2 declarations planned, 1 rendered, 1 skipped."));
        assert!(report.contains("## Acme.Geo"));
        assert!(report.contains("| type | `Acme.Geo.Point` | `Point` | ok |"));
        assert!(report.contains(
            "| aggregate | `Acme.Geo.Centroid` | `Centroid` | skipped: Aggregate Acme.Geo.Centroid has no step method 'Accumulate' |"
        ));
    }
}
