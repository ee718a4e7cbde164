//! SDK version handling.
//!
//! Cura plugins declare the full SDK versions they support (e.g. `"7.4.0"`);
//! packages are cut per *major* SDK version, and each major maps to the range
//! of Cura releases that shipped it.

use crate::{PackageError, PackageResult};
use std::fmt;

/// A major plugin SDK version, derived from the leading component of a
/// dotted version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SdkVersion {
    major: u64,
}

impl SdkVersion {
    /// Create an SDK version from a known major number.
    #[must_use]
    pub fn new(major: u64) -> Self {
        Self { major }
    }

    /// Parse the major SDK version from a dotted version string.
    ///
    /// Only the leading component matters: `"7.4.0"` and `"7.8"` both map to
    /// major 7. Anything without a leading integer is rejected.
    pub fn from_version_str(version: &str) -> PackageResult<Self> {
        let leading = version.split('.').next().unwrap_or_default();
        let major = leading.parse::<u64>().map_err(|_| {
            PackageError::InvalidManifest(format!(
                "invalid SDK version {version:?}: leading component is not an integer"
            ))
        })?;
        Ok(Self { major })
    }

    /// Reduce a list of full SDK version strings to the distinct major
    /// versions, in order of first appearance.
    ///
    /// An empty list is rejected: a plugin that supports no SDK version
    /// cannot be packaged.
    pub fn partition(versions: &[String]) -> PackageResult<Vec<SdkVersion>> {
        if versions.is_empty() {
            return Err(PackageError::InvalidManifest(
                "supported_sdk_versions must list at least one version".to_string(),
            ));
        }

        let mut majors = Vec::new();
        for version in versions {
            let sdk = Self::from_version_str(version)?;
            if !majors.contains(&sdk) {
                majors.push(sdk);
            }
        }
        Ok(majors)
    }

    /// The major version number.
    #[must_use]
    pub fn major(&self) -> u64 {
        self.major
    }

    /// The major version rendered as a full semver string (e.g. `"7.0.0"`).
    #[must_use]
    pub fn semver(&self) -> String {
        format!("{}.0.0", self.major)
    }

    /// The range of Cura releases that shipped this SDK major, as used in
    /// package file names (e.g. `Cura4.4-4.13`).
    ///
    /// Majors outside the known table are labelled `"Unknown"` so that
    /// packaging still succeeds for SDK versions newer than this tool.
    #[must_use]
    pub fn cura_versions(&self) -> &'static str {
        match self.major {
            5 => "3.5-3.6",
            6 => "4.0-4.3",
            7 => "4.4-4.13",
            8 => "5.0",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test]
    fn SdkVersion___from_version_str___takes_leading_component() {
        assert_eq!(SdkVersion::from_version_str("7.4.0").unwrap().major(), 7);
        assert_eq!(SdkVersion::from_version_str("8.0").unwrap().major(), 8);
        assert_eq!(SdkVersion::from_version_str("6").unwrap().major(), 6);
    }

    #[test]
    fn SdkVersion___from_version_str___rejects_non_numeric() {
        assert!(SdkVersion::from_version_str("abc").is_err());
        assert!(SdkVersion::from_version_str("").is_err());
        assert!(SdkVersion::from_version_str(".4.0").is_err());
        assert!(SdkVersion::from_version_str("v7.0").is_err());
    }

    #[test]
    fn SdkVersion___partition___deduplicates_in_first_seen_order() {
        let versions = vec![
            "7.4.0".to_string(),
            "5.0.0".to_string(),
            "7.8.0".to_string(),
            "8.0.0".to_string(),
            "5.2.1".to_string(),
        ];

        let majors = SdkVersion::partition(&versions).unwrap();
        let numbers: Vec<u64> = majors.iter().map(SdkVersion::major).collect();

        assert_eq!(numbers, vec![7, 5, 8]);
    }

    #[test]
    fn SdkVersion___partition___rejects_empty_list() {
        let result = SdkVersion::partition(&[]);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("at least one version")
        );
    }

    #[test]
    fn SdkVersion___partition___fails_on_unparseable_entry() {
        let versions = vec!["7.0.0".to_string(), "next".to_string()];

        assert!(SdkVersion::partition(&versions).is_err());
    }

    #[test_case(5, "3.5-3.6")]
    #[test_case(6, "4.0-4.3")]
    #[test_case(7, "4.4-4.13")]
    #[test_case(8, "5.0")]
    #[test_case(4, "Unknown")]
    #[test_case(9, "Unknown")]
    #[test_case(42, "Unknown")]
    fn SdkVersion___cura_versions___maps_major_to_release_range(major: u64, expected: &str) {
        assert_eq!(SdkVersion::new(major).cura_versions(), expected);
    }

    #[test]
    fn SdkVersion___semver___pads_with_zeroes() {
        assert_eq!(SdkVersion::new(7).semver(), "7.0.0");
        assert_eq!(SdkVersion::new(12).semver(), "12.0.0");
    }

    #[test]
    fn SdkVersion___display___shows_major_only() {
        assert_eq!(SdkVersion::new(8).to_string(), "8");
    }
}
