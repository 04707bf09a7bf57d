use crate::common::TestProject;
use crate::fixtures::CatalogFixture;

#[test]
fn test_strict_from_config_file() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::unreferenced().content).unwrap();
    project.write_config("strict = true\n").unwrap();

    project
        .run(&["validate"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Strict mode");
}

#[test]
fn test_config_replaces_advisories() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::incompatible().content).unwrap();
    project.write_config("[advisories]\nincompatible = []\n").unwrap();

    project.run(&["validate"]).unwrap().assert_success();
}

#[test]
fn test_explicit_config_flag_wins() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::unreferenced().content).unwrap();
    project.write_config("strict = true\n").unwrap();
    project.write_file("relaxed.toml", "strict = false\n").unwrap();

    project.run(&["--config", "relaxed.toml", "validate"]).unwrap().assert_success();
}

#[test]
fn test_broken_config_is_reported() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::basic().content).unwrap();
    project.write_config("strict = \n").unwrap();

    let output = project.run(&["validate"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid configuration file");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_advisory_rule_in_config() {
    let project = TestProject::new().unwrap();
    project.write_catalog(&CatalogFixture::basic().content).unwrap();
    project
        .write_config(
            r#"
[[advisories.incompatible]]
subject = ["agp"]
subject_versions = ">=8.0.0"
dependency = ["kotlin"]
minimum = "latest"
"#,
        )
        .unwrap();

    project
        .run(&["validate"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Invalid advisory tables");
}
