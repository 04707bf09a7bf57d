use std::time::Instant;

use catalog_check::test_utils::CatalogBuilder;

use crate::common::TestProject;

#[test]
fn test_two_hundred_catalogs() {
    let project = TestProject::new().unwrap();
    for i in 0..200 {
        let mut builder = CatalogBuilder::new()
            .generated_libraries(50)
            .library("androidx-junit", "androidx.test.ext:junit", "v0");
        if i % 50 == 0 {
            builder = builder.bundle("broken", &["ghost"]);
        }
        project.write_file(&format!("modules/m{i:03}/deps.versions.toml"), &builder.build()).unwrap();
    }

    let start = Instant::now();
    let output = project.run(&["--quiet", "validate", "--format", "json", "modules"]).unwrap();
    println!("validated 200 catalogs in {:?}", start.elapsed());

    output.assert_failure().assert_stderr_contains("4 of 200 catalog(s) failed validation");
    let json = output.json();
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 200);
    assert!(reports[0]["path"].as_str().unwrap().ends_with("m000/deps.versions.toml"));
    assert_eq!(reports[0]["isValid"], false);
    assert_eq!(reports[1]["isValid"], true);
}
