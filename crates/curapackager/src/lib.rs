//! Package assembly for Cura plugin distribution archives
//!
//! This crate turns a plugin source directory plus its `plugin.json` into
//! `.curapackage` archives - the ZIP-based container format Cura's package
//! manager installs from. A plugin that supports several major SDK versions
//! gets one archive per major, each stamped with that SDK version and named
//! after the Cura releases it targets.
//!
//! # Package Structure
//!
//! ```text
//! MyPlugin_v1.2.0_Cura4.4-4.13.curapackage
//! ├── files/
//! │   └── plugins/
//! │       └── MyPlugin/
//! │           ├── plugin.json
//! │           ├── __init__.py
//! │           └── ...            # full source tree, minus .git* entries
//! ├── package.json               # merged package metadata
//! ├── [Content_Types].xml
//! └── _rels/
//!     └── .rels
//! ```
//!
//! # Example
//!
//! ```no_run
//! use curapackager::{PackConfig, pipeline};
//!
//! let mut config = PackConfig::new("plugins/MyPlugin");
//! config.plugin_id = Some("MyPlugin".to_string());
//!
//! let report = pipeline::pack(&config)?;
//! for name in report.package_names() {
//!     println!("{name}");
//! }
//! # Ok::<(), curapackager::PackageError>(())
//! ```

mod error;
mod metadata;
mod sdk;

pub mod builder;
pub mod config;
pub mod loader;
pub mod pipeline;

pub use builder::{PackageBuilder, WriteReport, compute_sha256, file_sha256};
pub use config::{PackConfig, ResolvedConfig, TemplateSource, locate_static_dir};
pub use error::PackageError;
pub use loader::PackageLoader;
pub use metadata::{PackageMetadata, PluginManifest};
pub use pipeline::{PackReport, PackagedArchive, pack};
pub use sdk::SdkVersion;

/// Result type for packaging operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Package file extension.
pub const PACKAGE_EXTENSION: &str = "curapackage";

/// Package metadata file name, both inside the archive and as the default
/// template in the static resource directory.
pub const METADATA_FILE: &str = "package.json";

/// Plugin manifest file name at the root of a plugin source directory.
pub const PLUGIN_MANIFEST_FILE: &str = "plugin.json";

/// Content types declaration required by the container format.
pub const CONTENT_TYPES_FILE: &str = "[Content_Types].xml";

/// Relationship directory required by the container format.
pub const RELS_DIR: &str = "_rels";

/// Root of the plugin payload within an archive.
pub const PLUGIN_FILES_ROOT: &str = "files/plugins";
