//! End-to-end packaging pipeline.
//!
//! One call to [`pack`] takes a plugin source directory and produces one
//! `.curapackage` archive per distinct major SDK version the plugin
//! supports. Every archive carries the same plugin payload; only the SDK
//! stamp in its metadata and the Cura release range in its file name differ.

use crate::{
    CONTENT_TYPES_FILE, METADATA_FILE, PACKAGE_EXTENSION, PLUGIN_MANIFEST_FILE, PackConfig,
    PackageBuilder, PackageMetadata, PackageResult, PluginManifest, RELS_DIR, SdkVersion,
};
use std::path::PathBuf;

/// One archive produced by a packaging run.
#[derive(Debug, Clone)]
pub struct PackagedArchive {
    /// File name of the archive (e.g. `MyPlugin_v1.0.0_Cura5.0.curapackage`).
    pub file_name: String,
    /// Full path the archive was written to.
    pub path: PathBuf,
    /// Size of the archive in bytes.
    pub bytes_written: u64,
    /// SHA256 checksum of the archive, hex-encoded.
    pub sha256: String,
}

/// Outcome of a packaging run.
#[derive(Debug, Clone)]
pub struct PackReport {
    /// Produced archives, in SDK partition order.
    pub packages: Vec<PackagedArchive>,
    /// Non-fatal problems encountered across all archives.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// File names of all produced archives.
    #[must_use]
    pub fn package_names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.file_name.as_str()).collect()
    }
}

/// Run the packaging pipeline for one plugin.
///
/// Loads the metadata template and the plugin's `plugin.json`, merges them,
/// partitions the supported SDK versions by major, and writes one archive
/// per partition into the configured output directory.
pub fn pack(config: &PackConfig) -> PackageResult<PackReport> {
    let resolved = config.resolve();

    let mut package_info = PackageMetadata::from_file(resolved.template.path())?;
    let plugin = PluginManifest::from_file(resolved.source_dir.join(PLUGIN_MANIFEST_FILE))?;
    plugin.validate()?;

    let package_id = package_info.effective_package_id(resolved.plugin_id.as_deref())?;
    package_info.apply_plugin(&plugin, &package_id, resolved.template.is_default());

    let targets = SdkVersion::partition(&plugin.supported_sdk_versions)?;

    tracing::info!("creating curapackages for {package_id} {}", plugin.version);

    let mut packages = Vec::new();
    let mut warnings = Vec::new();

    for sdk in targets {
        let metadata = package_info.for_sdk(sdk);
        let file_name = format!(
            "{package_id}_v{}_Cura{}.{PACKAGE_EXTENSION}",
            plugin.version,
            sdk.cura_versions()
        );
        let path = resolved.output_dir.join(&file_name);

        tracing::info!("building {file_name}");

        let report = PackageBuilder::new()
            .add_plugin_tree(&resolved.source_dir, &package_id)?
            .add_bytes(METADATA_FILE, metadata.to_json()?.into_bytes())
            .add_static_file(resolved.static_dir.join(CONTENT_TYPES_FILE), CONTENT_TYPES_FILE)
            .add_static_tree(resolved.static_dir.join(RELS_DIR), RELS_DIR)?
            .write(&path)?;

        tracing::info!("{} total bytes", report.bytes_written);

        warnings.extend(report.warnings);
        packages.push(PackagedArchive {
            file_name,
            path,
            bytes_written: report.bytes_written,
            sha256: report.sha256,
        });
    }

    Ok(PackReport { packages, warnings })
}
