//! List command implementation

use anyhow::{Context, Result};
use curapackager::PackageLoader;
use std::path::Path;

/// Run the list command
pub fn run(package: &Path) -> Result<()> {
    let loader = PackageLoader::open(package)
        .with_context(|| format!("Failed to open: {}", package.display()))?;

    let metadata = loader.metadata();
    println!(
        "Package: {} v{}",
        metadata.package_id, metadata.package_version
    );
    println!("Name: {}", metadata.display_name);

    if let Some(description) = &metadata.description {
        println!("Description: {description}");
    }
    if let Some(sdk) = metadata.sdk_version {
        println!("SDK version: {sdk}");
    }
    if let Some(semver) = &metadata.sdk_version_semver {
        println!("SDK semver: {semver}");
    }

    println!("\nFiles:");
    for file in loader.list_files() {
        println!("  {file}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use curapackager::PackageBuilder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn run___shows_package_contents() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = temp_dir.path().join("demo.curapackage");

        let source = temp_dir.path().join("Demo");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("plugin.json"), "{}").unwrap();

        PackageBuilder::new()
            .add_plugin_tree(&source, "Demo")
            .unwrap()
            .add_bytes(
                "package.json",
                br#"{"package_id": "Demo", "package_version": "1.0.0"}"#.to_vec(),
            )
            .write(&package_path)
            .unwrap();

        // List should succeed
        run(&package_path).unwrap();
    }

    #[test]
    fn run___missing_package___returns_error() {
        let result = run(Path::new("/nonexistent/demo.curapackage"));

        assert!(result.is_err());
    }
}
