#![allow(dead_code)]

use std::path::PathBuf;

use plmono_deploy::generator::declarations::DdlComposer;
use plmono_deploy::generator::deploy_plan::{self, DeployPlan};
use plmono_deploy::metadata::descriptors::Library;
use plmono_deploy::metadata::manifest;

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn fixture_manifest_path(fixture: &str) -> PathBuf {
    fixture_dir(fixture).join("library.json")
}

pub(crate) fn load_fixture_library(fixture: &str) -> Library {
    manifest::load_library(&fixture_manifest_path(fixture)).expect("fixture manifest should parse")
}

pub(crate) fn read_fixture_expected_sql(fixture: &str) -> String {
    let path = fixture_dir(fixture).join("expected.sql");
    std::fs::read_to_string(path).expect("fixture expected SQL should be readable")
}

pub(crate) fn plan_fixture(fixture: &str) -> DeployPlan {
    let library = load_fixture_library(fixture);
    deploy_plan::plan_library(&library, &DdlComposer::default())
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
