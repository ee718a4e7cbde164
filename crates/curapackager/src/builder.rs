//! Package archive assembly.
//!
//! The [`PackageBuilder`] collects archive entries (the plugin source tree
//! plus the metadata and container resources) and streams them into a single
//! `.curapackage` ZIP file.
//!
//! Entries are written in the order they were declared. Files gathered by a
//! directory scan may legitimately vanish between scan and write (build
//! directories get cleaned underneath us); those are logged and skipped.
//! Explicitly declared files have no such excuse and fail the build.

use crate::{PLUGIN_FILES_ROOT, PackageError, PackageResult};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for a single `.curapackage` archive.
///
/// # Example
///
/// ```no_run
/// use curapackager::PackageBuilder;
///
/// let report = PackageBuilder::new()
///     .add_plugin_tree("plugins/MyPlugin", "MyPlugin")?
///     .add_bytes("package.json", b"{}".to_vec())
///     .add_static_file("files/[Content_Types].xml", "[Content_Types].xml")
///     .write("MyPlugin_v1.0.0_Cura5.0.curapackage")?;
///
/// println!("{} bytes", report.bytes_written);
/// # Ok::<(), curapackager::PackageError>(())
/// ```
#[derive(Default)]
pub struct PackageBuilder {
    entries: Vec<PackageEntry>,
    warnings: Vec<String>,
}

/// An entry to include in the archive.
struct PackageEntry {
    /// Path within the archive, always forward-slash separated.
    archive_path: String,
    /// Where the entry's bytes come from.
    source: EntrySource,
}

enum EntrySource {
    /// A file collected by a directory scan; may vanish before writing.
    Walked(PathBuf),
    /// An explicitly declared file; must exist at write time.
    Fixed(PathBuf),
    /// Literal in-memory contents.
    Literal(Vec<u8>),
}

/// Outcome of writing one archive.
#[derive(Debug, Clone)]
pub struct WriteReport {
    /// Size of the finished archive in bytes.
    pub bytes_written: u64,
    /// SHA256 checksum of the finished archive, hex-encoded.
    pub sha256: String,
    /// Non-fatal problems encountered while assembling the archive.
    pub warnings: Vec<String>,
}

impl PackageBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every file under a plugin source directory, rooted at
    /// `files/plugins/{package_id}/` within the archive.
    ///
    /// Any file or directory whose name starts with `.git` is excluded,
    /// pruning whole subtrees, so version-control metadata never reaches
    /// the distributed package.
    pub fn add_plugin_tree<P: AsRef<Path>>(
        self,
        source_dir: P,
        package_id: &str,
    ) -> PackageResult<Self> {
        let prefix = format!("{PLUGIN_FILES_ROOT}/{package_id}");
        self.add_tree(source_dir.as_ref(), &prefix, |name| {
            !name.starts_with(".git")
        })
    }

    /// Add every file under a static resource directory, rooted at
    /// `archive_root` within the archive.
    pub fn add_static_tree<P: AsRef<Path>>(
        self,
        source_dir: P,
        archive_root: &str,
    ) -> PackageResult<Self> {
        self.add_tree(source_dir.as_ref(), archive_root, |_| true)
    }

    /// Add a single file that must exist when the archive is written.
    pub fn add_static_file<P: AsRef<Path>>(mut self, source_path: P, archive_path: &str) -> Self {
        self.entries.push(PackageEntry {
            archive_path: archive_path.to_string(),
            source: EntrySource::Fixed(source_path.as_ref().to_path_buf()),
        });
        self
    }

    /// Add raw bytes as a file in the archive.
    pub fn add_bytes(mut self, archive_path: &str, contents: Vec<u8>) -> Self {
        self.entries.push(PackageEntry {
            archive_path: archive_path.to_string(),
            source: EntrySource::Literal(contents),
        });
        self
    }

    fn add_tree<F>(mut self, root: &Path, prefix: &str, include: F) -> PackageResult<Self>
    where
        F: Fn(&str) -> bool,
    {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| include(&entry.file_name().to_string_lossy()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_not_found(&err) => {
                    self.warn(err.to_string());
                    continue;
                }
                Err(err) => return Err(walk_error(err)),
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            self.entries.push(PackageEntry {
                archive_path: join_archive_path(prefix, relative),
                source: EntrySource::Walked(entry.into_path()),
            });
        }

        Ok(self)
    }

    /// Write the archive to a file.
    ///
    /// Entries are deflated at maximum compression. Returns the size and
    /// checksum of the finished archive along with any warnings gathered
    /// since the builder was created.
    pub fn write<P: AsRef<Path>>(mut self, output_path: P) -> PackageResult<WriteReport> {
        let output_path = output_path.as_ref();

        let file = File::create(output_path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(9));

        let entries = std::mem::take(&mut self.entries);
        for entry in &entries {
            match &entry.source {
                EntrySource::Literal(contents) => {
                    zip.start_file(entry.archive_path.as_str(), options)?;
                    zip.write_all(contents)?;
                }
                EntrySource::Fixed(path) => {
                    let mut source = File::open(path).map_err(|e| {
                        io::Error::new(e.kind(), format!("{}: {e}", path.display()))
                    })?;
                    zip.start_file(entry.archive_path.as_str(), options)?;
                    io::copy(&mut source, &mut zip)?;
                }
                EntrySource::Walked(path) => {
                    let mut source = match File::open(path) {
                        Ok(file) => file,
                        Err(e) if e.kind() == ErrorKind::NotFound => {
                            self.warn(format!("skipping {}: {e}", path.display()));
                            continue;
                        }
                        Err(e) => return Err(e.into()),
                    };
                    zip.start_file(entry.archive_path.as_str(), options)?;
                    io::copy(&mut source, &mut zip)?;
                }
            }
        }

        zip.finish()?;

        let bytes_written = fs::metadata(output_path)?.len();
        let sha256 = file_sha256(output_path)?;

        Ok(WriteReport {
            bytes_written,
            sha256,
            warnings: self.warnings,
        })
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Compute the SHA256 hash of a file on disk.
pub fn file_sha256<P: AsRef<Path>>(path: P) -> PackageResult<String> {
    let contents = fs::read(path)?;
    Ok(compute_sha256(&contents))
}

/// Join a relative filesystem path onto an archive path prefix, using
/// forward slashes regardless of platform.
fn join_archive_path(prefix: &str, relative: &Path) -> String {
    let mut out = String::from(prefix);
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

fn walk_error(err: walkdir::Error) -> PackageError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(io) => PackageError::Io(io),
        None => PackageError::Io(io::Error::other(message)),
    }
}
