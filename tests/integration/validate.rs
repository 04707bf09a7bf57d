use predicates::prelude::*;

use crate::common::TestProject;
use crate::fixtures::CatalogFixture;

/// A clean catalog passes with a check mark
#[test]
fn test_validate_valid_catalog() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::basic().content).unwrap();

    let output = project.run(&["validate"]).unwrap();
    output.assert_success().assert_stdout_contains("✓").assert_stdout_contains("is valid");
    assert!(!output.stdout.contains("Warning"), "{}", output.stdout);
}

#[test]
fn test_validate_incompatible_versions() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::incompatible().content).unwrap();

    let output = project.run(&["validate"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("✗")
        .assert_stdout_contains("agp 8.11.1")
        .assert_stdout_contains("kotlin")
        .assert_stderr_contains("1 of 1 catalog(s) failed validation");
    assert_eq!(output.code, Some(1));
}

#[test]
fn test_validate_invalid_module_json() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::invalid_module().content).unwrap();

    let output = project.run(&["validate", "--format", "json"]).unwrap();
    output.assert_failure();
    let json = output.json();
    assert_eq!(json["isValid"], false);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("invalid-module-format"));
    assert!(json["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn test_validate_dangling_bundle() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::dangling_bundle().content).unwrap();

    project
        .command()
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Bundle 'testing' references undefined library 'missing-lib'",
        ));
}

#[test]
fn test_validate_empty_sections() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::empty_sections().content).unwrap();

    let output = project.run(&["validate", "--format", "json"]).unwrap();
    output.assert_failure();
    assert_eq!(
        output.json()["errors"],
        serde_json::json!(["versions section is empty", "libraries section is empty"])
    );
}

#[test]
fn test_validate_syntax_error_reports_line() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::invalid_syntax().content).unwrap();

    let output = project.run(&["validate"]).unwrap();
    output.assert_failure().assert_stdout_contains("Syntax error at line 2");
}

#[test]
fn test_validate_missing_file() {
    let project = TestProject::new().unwrap();

    let output = project.run(&["validate", "--format", "json", "nope.versions.toml"]).unwrap();
    output.assert_failure();
    let json = output.json();
    assert_eq!(json["isValid"], false);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    assert!(json["errors"][0].as_str().unwrap().contains("nope.versions.toml"));
}

#[test]
fn test_warnings_do_not_fail_without_strict() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::unreferenced().content).unwrap();

    project
        .run(&["validate"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("⚠ Warning: Version 'coil' is declared but never referenced");

    project
        .run(&["validate", "--strict"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Strict mode: 1 warning(s) treated as errors");
}

#[test]
fn test_quiet_hides_valid_catalogs() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::unreferenced().content).unwrap();

    let output = project.run(&["--quiet", "validate"]).unwrap();
    output.assert_success();
    assert!(output.stdout.trim().is_empty(), "{}", output.stdout);
}

#[test]
fn test_validate_multiple_files_json_array() {
    let project = TestProject::new().unwrap();
    let good = project.write_file("a.versions.toml", &CatalogFixture::basic().content).unwrap();
    let bad =
        project.write_file("b.versions.toml", &CatalogFixture::dangling_bundle().content).unwrap();

    let output = project
        .run(&[
            "validate",
            "--format",
            "json",
            good.to_str().unwrap(),
            bad.to_str().unwrap(),
        ])
        .unwrap();
    output.assert_failure().assert_stderr_contains("1 of 2 catalog(s) failed validation");

    let json = output.json();
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["path"].as_str().unwrap().ends_with("a.versions.toml"));
    assert_eq!(reports[0]["isValid"], true);
    assert_eq!(reports[1]["isValid"], false);
}

#[test]
fn test_advisories_flag() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::incompatible().content).unwrap();
    project.write_file("advisories.toml", "incompatible = []\n").unwrap();

    project.run(&["validate", "--advisories", "advisories.toml"]).unwrap().assert_success();
}

#[test]
fn test_invalid_format_value() {
    let project = TestProject::new().unwrap();
    project
        .command()
        .args(["validate", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}
