use std::time::Instant;

use catalog_check::catalog::CatalogValidator;
use catalog_check::test_utils::{CatalogBuilder, init_test_logging};

#[test]
fn test_twenty_thousand_libraries() {
    init_test_logging(None);
    let text = CatalogBuilder::new()
        .generated_libraries(20_000)
        .library("androidx-junit", "androidx.test.ext:junit", "v0")
        .build();

    let start = Instant::now();
    let result = CatalogValidator::new().validate_str(&text);
    println!("validated {} bytes in {:?}", text.len(), start.elapsed());

    assert!(result.is_valid(), "{:?}", result.errors().first());
    assert!(result.warnings().is_empty());
}

#[test]
fn test_many_dangling_references() {
    let mut builder = CatalogBuilder::new().version("agp", "8.11.1");
    for i in 0..5_000 {
        builder = builder.library(&format!("lib{i}"), &format!("com.example:lib{i}"), &format!("missing{i}"));
    }
    let text = builder.library("androidx-junit", "androidx.test.ext:junit", "agp").build();

    let start = Instant::now();
    let result = CatalogValidator::new().validate_str(&text);
    println!("5000 dangling references in {:?}", start.elapsed());

    assert_eq!(result.errors().len(), 5_000);
}

#[test]
fn test_large_bundle() {
    let members: Vec<String> = (0..10_000).map(|i| format!("lib{i}")).collect();
    let member_refs: Vec<&str> = members.iter().map(String::as_str).collect();
    let text = CatalogBuilder::new()
        .generated_libraries(10_000)
        .library("androidx-junit", "androidx.test.ext:junit", "v0")
        .bundle("everything", &member_refs)
        .build();

    let result = CatalogValidator::new().validate_str(&text);
    assert!(result.is_valid(), "{:?}", result.errors().first());
}

/// Dangling references spread over thousands of similar declared names
#[test]
fn test_dangling_references_among_many_versions() {
    let mut builder = CatalogBuilder::new();
    for i in 0..5_000 {
        builder = builder.version(&format!("version{i}"), "1.0.0");
    }
    for i in 0..5_000 {
        builder = builder.library(&format!("lib{i}"), &format!("com.example:lib{i}"), &format!("versoin{i}"));
    }
    let text = builder.build();

    let start = Instant::now();
    let result = CatalogValidator::new().validate_str(&text);
    let elapsed = start.elapsed();
    println!("5000 dangling references over 5000 versions in {elapsed:?}");

    assert_eq!(result.errors().len(), 5_000);
    assert!(result.errors()[0].ends_with("(did you mean 'version0'?)"), "{}", result.errors()[0]);
    assert!(elapsed.as_secs() < 10, "took {elapsed:?}");
}

#[test]
fn test_very_long_dangling_reference() {
    let key = "a".repeat(20_000);
    let reference = "b".repeat(20_000);
    let text = CatalogBuilder::new()
        .version(&key, "1.0.0")
        .library("lib", "com.example:lib", &reference)
        .build();

    let start = Instant::now();
    let result = CatalogValidator::new().validate_str(&text);
    let elapsed = start.elapsed();

    assert_eq!(result.errors().len(), 1);
    assert!(!result.errors()[0].contains("did you mean"));
    assert!(elapsed.as_secs() < 2, "took {elapsed:?}");
}
