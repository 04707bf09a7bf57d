use predicates::prelude::*;

use crate::common::TestProject;
use crate::fixtures::CatalogFixture;

#[test]
fn test_finds_catalog_from_subdirectory() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::basic().content).unwrap();
    let nested = project.project_path().join("app/src/main");
    std::fs::create_dir_all(&nested).unwrap();

    project
        .command()
        .current_dir(&nested)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("libs.versions.toml is valid"));
}

#[test]
fn test_root_catalog_when_no_gradle_dir() {
    let project = TestProject::new().unwrap();
    project.write_file("libs.versions.toml", &CatalogFixture::incompatible().content).unwrap();

    project.run(&["validate"]).unwrap().assert_failure().assert_stdout_contains("kotlin");
}

#[test]
fn test_no_catalog_found() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("validate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No version catalog found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_directory_argument_skips_build_output() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::basic().content).unwrap();
    project
        .write_file("build-logic/gradle/tools.versions.toml", &CatalogFixture::unreferenced().content)
        .unwrap();
    project
        .write_file("app/build/generated.versions.toml", &CatalogFixture::empty_sections().content)
        .unwrap();

    let output = project.run(&["validate", "."]).unwrap();
    output
        .assert_success()
        .assert_stdout_contains("tools.versions.toml is valid")
        .assert_stdout_contains("Validated 2 catalog(s): 2 valid, 0 invalid");
    assert!(!output.stdout.contains("generated.versions.toml"));
}

#[test]
fn test_directory_without_catalogs() {
    let project = TestProject::new().unwrap();
    std::fs::create_dir_all(project.project_path().join("docs")).unwrap();

    project
        .run(&["validate", "docs"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("No *.versions.toml files found in docs");
}
