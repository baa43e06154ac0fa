//! CLI entry point for `plmono-deploy`.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use plmono_deploy::generator::declarations::{DdlComposer, PoetConfig, DEFAULT_LANGUAGE};
use plmono_deploy::generator::deploy_plan::{self, DeployPlan};
use plmono_deploy::metadata::manifest;
use plmono_deploy::output::{formatter, report};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "plmono-deploy",
    about = "Generate PL/Mono DDL for the SQL types, functions, aggregates and triggers of compiled libraries"
)]
struct Cli {
    /// Library manifests (JSON) to analyse
    #[arg(required = true)]
    manifests: Vec<PathBuf>,

    /// Write the DDL script to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a markdown summary of rendered and skipped declarations
    #[arg(long)]
    report: Option<PathBuf>,

    /// Handler language used in LANGUAGE clauses
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Prefix dispatch handles with the library's assembly name
    #[arg(long)]
    qualify_with_assembly: bool,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "plmono_deploy=debug,warn"
        } else {
            "warn"
        })
    });
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.language.trim().is_empty() {
        eprintln!("Handler language must not be empty");
        process::exit(2);
    }

    // Load every manifest; a broken one is reported and the rest still run.
    let mut load_failed = false;
    let mut plans: Vec<DeployPlan> = Vec::new();
    for path in &cli.manifests {
        let library = match manifest::load_library(path) {
            Ok(library) => library,
            Err(e) => {
                eprintln!("{e}");
                load_failed = true;
                continue;
            }
        };

        let config = PoetConfig {
            language: cli.language.clone(),
            assembly: cli
                .qualify_with_assembly
                .then(|| library.assembly.clone()),
        };
        let composer = DdlComposer::new(config);
        let plan = deploy_plan::plan_library(&library, &composer);

        if cli.verbose {
            eprintln!(
                "{}: {} declarations, {} skipped",
                path.display(),
                plan.items.len(),
                plan.failures().count()
            );
        }
        plans.push(plan);
    }

    let script = formatter::render_script(&plans);
    match &cli.output {
        Some(path) => {
            if let Err(e) = formatter::write_output(path, &script) {
                eprintln!("Error writing output: {e}");
                process::exit(2);
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout
                .write_all(script.as_bytes())
                .and_then(|()| stdout.flush())
            {
                eprintln!("Error writing output: {e}");
                process::exit(2);
            }
        }
    }

    if let Some(path) = &cli.report {
        if let Err(e) = formatter::write_output(path, &report::build_report(&plans)) {
            eprintln!("Error writing report: {e}");
            process::exit(2);
        }
    }

    if load_failed {
        process::exit(2);
    }
    if plans.iter().any(DeployPlan::has_failures) {
        process::exit(1);
    }
}
