//! Package and plugin metadata schemas.
//!
//! Two JSON documents drive packaging: the plugin's own `plugin.json`
//! (authored by the plugin developer, read-only here) and the package
//! metadata that ends up as `package.json` inside each archive. The package
//! metadata starts from a template and is overwritten field by field with
//! values taken from the plugin manifest.

use crate::{PackageError, PackageResult, SdkVersion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Package metadata - the `package.json` document written into each archive.
///
/// Only the fields the packager reads or rewrites are typed; everything else
/// a template author puts in the document is carried through untouched in
/// [`extra`](Self::extra).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Unique package identifier (e.g. "MaterialSettingsPlugin").
    #[serde(default)]
    pub package_id: String,

    /// Package version, copied from the plugin version.
    #[serde(default)]
    pub package_version: String,

    /// Human-readable package name.
    #[serde(default)]
    pub display_name: String,

    /// Short description. Omitted from the output when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Major SDK version this archive targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<u64>,

    /// The same SDK version as a full semver string (e.g. "7.0.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version_semver: Option<String>,

    /// All remaining template fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Plugin manifest - the `plugin.json` document at the root of a plugin
/// source directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin display name.
    #[serde(default)]
    pub name: String,

    /// Plugin version (e.g. "1.2.0").
    #[serde(default)]
    pub version: String,

    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Full SDK versions the plugin supports (e.g. ["7.4.0", "8.0.0"]).
    #[serde(default)]
    pub supported_sdk_versions: Vec<String>,
}

impl PackageMetadata {
    /// Load package metadata from a template file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PackageResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> PackageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> PackageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the effective package identifier.
    ///
    /// A non-empty override wins; otherwise the template's `package_id` is
    /// used. An empty result is rejected because the identifier names the
    /// plugin directory inside the archive.
    pub fn effective_package_id(&self, override_id: Option<&str>) -> PackageResult<String> {
        let id = override_id
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.package_id.clone());

        if id.is_empty() {
            return Err(PackageError::InvalidManifest(
                "package_id is required: pass a plugin id or set package_id in the metadata template"
                    .to_string(),
            ));
        }
        Ok(id)
    }

    /// Overwrite template fields with values from the plugin manifest.
    ///
    /// The description is only adopted when `adopt_description` is set; a
    /// custom template keeps its own description (or its absence).
    pub fn apply_plugin(
        &mut self,
        plugin: &PluginManifest,
        package_id: &str,
        adopt_description: bool,
    ) {
        self.package_id = package_id.to_string();
        self.package_version = plugin.version.clone();
        self.display_name = plugin.name.clone();
        if adopt_description {
            self.description = plugin.description.clone();
        }
    }

    /// A copy of this metadata stamped for one target SDK version.
    #[must_use]
    pub fn for_sdk(&self, sdk: SdkVersion) -> Self {
        let mut metadata = self.clone();
        metadata.sdk_version = Some(sdk.major());
        metadata.sdk_version_semver = Some(sdk.semver());
        metadata
    }
}

impl PluginManifest {
    /// Load a plugin manifest from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PackageResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> PackageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the manifest.
    pub fn validate(&self) -> PackageResult<()> {
        if self.name.is_empty() {
            return Err(PackageError::InvalidManifest(
                "plugin.json: name is required".to_string(),
            ));
        }

        if self.version.is_empty() {
            return Err(PackageError::InvalidManifest(
                "plugin.json: version is required".to_string(),
            ));
        }

        Ok(())
    }
}
