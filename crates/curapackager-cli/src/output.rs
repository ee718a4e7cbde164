//! GitHub Actions step output bridging
//!
//! Inside an Actions step the runner exposes a `GITHUB_OUTPUT` file; every
//! `name=value` line appended to it becomes a step output visible to later
//! workflow steps. Outside of Actions there is nothing to record and
//! [`set_output`] is a no-op.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Record a step output when running under GitHub Actions.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    match env::var_os("GITHUB_OUTPUT") {
        Some(path) => append_output(Path::new(&path), name, value),
        None => Ok(()),
    }
}

fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{name}={value}")
}
