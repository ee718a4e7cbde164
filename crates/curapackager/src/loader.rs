//! Package inspection utilities.
//!
//! The [`PackageLoader`] opens an existing `.curapackage` archive and exposes
//! its metadata and entries, mainly for verification after a build.

use crate::{METADATA_FILE, PackageError, PackageMetadata, PackageResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Loader for produced packages.
///
/// # Example
///
/// ```no_run
/// use curapackager::PackageLoader;
///
/// let loader = PackageLoader::open("MyPlugin_v1.0.0_Cura5.0.curapackage")?;
/// println!("{}", loader.metadata().package_id);
/// for name in loader.list_files() {
///     println!("  {name}");
/// }
/// # Ok::<(), curapackager::PackageError>(())
/// ```
#[derive(Debug)]
pub struct PackageLoader {
    archive: ZipArchive<File>,
    metadata: PackageMetadata,
}

impl PackageLoader {
    /// Open a package file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> PackageResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        // Read and parse the package metadata
        let metadata = {
            let mut metadata_file = archive.by_name(METADATA_FILE).map_err(|_| {
                PackageError::MissingFile(format!("{METADATA_FILE} not found in package"))
            })?;

            let mut metadata_json = String::new();
            metadata_file.read_to_string(&mut metadata_json)?;
            PackageMetadata::from_json(&metadata_json)?
        };

        Ok(Self { archive, metadata })
    }

    /// Get the package metadata.
    #[must_use]
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Read a file from the package as bytes.
    pub fn read_file(&mut self, path: &str) -> PackageResult<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| PackageError::MissingFile(format!("File not found in package: {path}")))?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Read a file from the package as a string.
    pub fn read_file_string(&mut self, path: &str) -> PackageResult<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| PackageError::MissingFile(format!("File not found in package: {path}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// List all files in the package.
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(String::from))
            .collect()
    }

    /// List the plugin payload files, i.e. everything under `files/plugins/`.
    #[must_use]
    pub fn plugin_files(&self) -> Vec<String> {
        let prefix = format!("{}/", crate::PLUGIN_FILES_ROOT);
        self.list_files()
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }

    /// Check if a file exists in the package.
    #[must_use]
    pub fn has_file(&self, path: &str) -> bool {
        self.archive.index_for_name(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::PackageBuilder;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_package(temp_dir: &TempDir) -> PathBuf {
        let package_path = temp_dir.path().join("test.curapackage");

        let source = temp_dir.path().join("TestPlugin");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("plugin.json"), "{\"name\": \"Test\"}").unwrap();
        fs::write(source.join("__init__.py"), "# init").unwrap();

        let metadata = concat!(
            "{\"package_id\": \"TestPlugin\", \"package_version\": \"1.0.0\",",
            " \"display_name\": \"Test Plugin\", \"sdk_version\": 8,",
            " \"sdk_version_semver\": \"8.0.0\"}"
        );

        PackageBuilder::new()
            .add_plugin_tree(&source, "TestPlugin")
            .unwrap()
            .add_bytes(METADATA_FILE, metadata.as_bytes().to_vec())
            .add_bytes("[Content_Types].xml", b"<Types/>".to_vec())
            .write(&package_path)
            .unwrap();

        package_path
    }

    #[test]
    fn PackageLoader___open___reads_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = create_test_package(&temp_dir);

        let loader = PackageLoader::open(&package_path).unwrap();

        assert_eq!(loader.metadata().package_id, "TestPlugin");
        assert_eq!(loader.metadata().package_version, "1.0.0");
        assert_eq!(loader.metadata().sdk_version, Some(8));
    }

    #[test]
    fn PackageLoader___open___nonexistent_file___returns_error() {
        let result = PackageLoader::open("/nonexistent/pkg.curapackage");

        assert!(result.is_err());
    }

    #[test]
    fn PackageLoader___open___not_a_zip___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let fake_package = temp_dir.path().join("fake.curapackage");
        fs::write(&fake_package, b"not a zip file").unwrap();

        let result = PackageLoader::open(&fake_package);

        assert!(result.is_err());
    }

    #[test]
    fn PackageLoader___open___missing_metadata___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = temp_dir.path().join("no-metadata.curapackage");

        // Create a ZIP without package.json
        let file = File::create(&package_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("some-file.txt", options).unwrap();
        zip.write_all(b"content").unwrap();
        zip.finish().unwrap();

        let result = PackageLoader::open(&package_path);

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, PackageError::MissingFile(_)));
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn PackageLoader___open___invalid_metadata_json___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = temp_dir.path().join("bad-metadata.curapackage");

        let file = File::create(&package_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("package.json", options).unwrap();
        zip.write_all(b"{ invalid json }").unwrap();
        zip.finish().unwrap();

        let result = PackageLoader::open(&package_path);

        assert!(result.is_err());
    }

    #[test]
    fn PackageLoader___list_files___returns_all_entries() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = create_test_package(&temp_dir);

        let loader = PackageLoader::open(&package_path).unwrap();
        let files = loader.list_files();

        assert!(files.contains(&"package.json".to_string()));
        assert!(files.contains(&"[Content_Types].xml".to_string()));
        assert!(files.contains(&"files/plugins/TestPlugin/plugin.json".to_string()));
    }

    #[test]
    fn PackageLoader___plugin_files___filters_to_plugin_payload() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = create_test_package(&temp_dir);

        let loader = PackageLoader::open(&package_path).unwrap();
        let files = loader.plugin_files();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.starts_with("files/plugins/")));
    }

    #[test]
    fn PackageLoader___has_file___returns_true_for_existing() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = create_test_package(&temp_dir);

        let loader = PackageLoader::open(&package_path).unwrap();

        assert!(loader.has_file("package.json"));
        assert!(loader.has_file("files/plugins/TestPlugin/__init__.py"));
        assert!(!loader.has_file("nonexistent.txt"));
    }

    #[test]
    fn PackageLoader___read_file___returns_contents() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = create_test_package(&temp_dir);

        let mut loader = PackageLoader::open(&package_path).unwrap();
        let contents = loader
            .read_file_string("files/plugins/TestPlugin/__init__.py")
            .unwrap();

        assert_eq!(contents, "# init");
    }

    #[test]
    fn PackageLoader___read_file___missing_file___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let package_path = create_test_package(&temp_dir);

        let mut loader = PackageLoader::open(&package_path).unwrap();
        let result = loader.read_file("nonexistent.txt");

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, PackageError::MissingFile(_)));
    }
}
