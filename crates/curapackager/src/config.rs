//! Packaging run configuration.
//!
//! A [`PackConfig`] carries the raw inputs of one packaging run; resolving it
//! normalizes empty values, locates the static resource directory, and
//! decides which metadata template to load. Resolution performs filesystem
//! existence checks but has no other side effects.

use crate::METADATA_FILE;
use std::path::{Path, PathBuf};

/// Raw inputs for one packaging run.
///
/// Optional fields left as `None` (or set to empty values) fall back to
/// their defaults during [`resolve`](Self::resolve).
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Plugin source directory; must contain `plugin.json`.
    pub source_dir: PathBuf,

    /// Override for the package identifier. Empty means unset.
    pub plugin_id: Option<String>,

    /// Path to a custom metadata template. Empty or missing paths fall back
    /// to the bundled default template.
    pub package_info_path: Option<PathBuf>,

    /// Override for the static resource directory.
    pub static_dir: Option<PathBuf>,

    /// Directory the archives are written into. Defaults to the current
    /// working directory.
    pub output_dir: Option<PathBuf>,
}

/// A [`PackConfig`] with all fallbacks applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Plugin source directory.
    pub source_dir: PathBuf,

    /// Package identifier override, with empty strings normalized away.
    pub plugin_id: Option<String>,

    /// The metadata template to load.
    pub template: TemplateSource,

    /// Directory holding the bundled container resources.
    pub static_dir: PathBuf,

    /// Directory the archives are written into.
    pub output_dir: PathBuf,
}

/// Which metadata template a run resolved to.
///
/// The distinction matters beyond the path: only the bundled default
/// template adopts the plugin's own description during the metadata merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A caller-provided template file.
    Custom(PathBuf),
    /// The default template bundled with the static resources.
    Default(PathBuf),
}

impl TemplateSource {
    /// Path of the template file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Custom(path) | Self::Default(path) => path,
        }
    }

    /// Whether this run resolved to the bundled default template.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

impl PackConfig {
    /// Create a config for the given plugin source directory, with every
    /// optional input unset.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into(),
            plugin_id: None,
            package_info_path: None,
            static_dir: None,
            output_dir: None,
        }
    }

    /// Apply all fallbacks and produce the effective configuration.
    #[must_use]
    pub fn resolve(&self) -> ResolvedConfig {
        let static_dir = match &self.static_dir {
            Some(dir) => dir.clone(),
            None => default_static_dir(),
        };

        let default_template = static_dir.join(METADATA_FILE);
        let template = match &self.package_info_path {
            Some(path)
                if !path.as_os_str().is_empty()
                    && path.is_file()
                    && *path != default_template =>
            {
                TemplateSource::Custom(path.clone())
            }
            _ => TemplateSource::Default(default_template),
        };

        let plugin_id = self.plugin_id.clone().filter(|id| !id.is_empty());

        let output_dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => PathBuf::from("."),
        };

        ResolvedConfig {
            source_dir: self.source_dir.clone(),
            plugin_id,
            template,
            static_dir,
            output_dir,
        }
    }
}

/// Locate the static resource directory under a base directory.
///
/// `{base}/files` wins when it exists; otherwise `{base}/dist/files` is
/// assumed. The packaged layout ships resources under `dist/`, source
/// checkouts keep them at the top level.
#[must_use]
pub fn locate_static_dir(base: &Path) -> PathBuf {
    let primary = base.join("files");
    if primary.is_dir() {
        primary
    } else {
        base.join("dist").join("files")
    }
}

/// Default static resource directory: probe next to the running executable
/// first, then fall back to the crate's own `files/` directory.
fn default_static_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let probed = locate_static_dir(dir);
            if probed.is_dir() {
                return probed;
            }
        }
    }
    locate_static_dir(Path::new(env!("CARGO_MANIFEST_DIR")))
}
