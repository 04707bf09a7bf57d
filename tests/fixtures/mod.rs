/// Sample `libs.versions.toml` files
pub struct CatalogFixture {
    pub content: String,
    #[allow(dead_code)]
    pub name: String,
}

impl CatalogFixture {
    fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.trim_start().to_string(),
        }
    }

    /// A small catalog with no findings
    pub fn basic() -> Self {
        Self::new(
            "basic",
            r#"
[versions]
agp = "8.11.1"
kotlin = "2.0.21"
ksp = "2.0.21-1.0.27"

[libraries]
androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
kotlin-stdlib = { group = "org.jetbrains.kotlin", name = "kotlin-stdlib", version.ref = "kotlin" }

[plugins]
kotlin-android = { id = "org.jetbrains.kotlin.android", version.ref = "kotlin" }
ksp = { id = "com.google.devtools.ksp", version.ref = "ksp" }

[bundles]
testing = ["androidx-junit"]
"#,
        )
    }

    /// AGP 8 with a Kotlin release it does not support
    pub fn incompatible() -> Self {
        Self::new(
            "incompatible",
            r#"
[versions]
agp = "8.11.1"
kotlin = "1.8.0"

[libraries]
androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
"#,
        )
    }

    pub fn invalid_module() -> Self {
        Self::new(
            "invalid_module",
            r#"
[versions]
agp = "8.11.1"

[libraries]
broken = { module = "invalid-module-format", version.ref = "agp" }
androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
"#,
        )
    }

    pub fn dangling_bundle() -> Self {
        Self::new(
            "dangling_bundle",
            r#"
[versions]
agp = "8.11.1"

[libraries]
androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }

[bundles]
testing = ["androidx-junit", "missing-lib"]
"#,
        )
    }

    pub fn empty_sections() -> Self {
        Self::new("empty_sections", "[versions]\n\n[libraries]\n")
    }

    /// Unterminated string in `[versions]`
    pub fn invalid_syntax() -> Self {
        Self::new(
            "invalid_syntax",
            r#"
[versions]
agp = "8.11.1

[libraries]
androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
"#,
        )
    }

    /// Valid, with one version nobody references
    pub fn unreferenced() -> Self {
        Self::new(
            "unreferenced",
            r#"
[versions]
agp = "8.11.1"
coil = "2.7.0"

[libraries]
androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
"#,
        )
    }
}
