//! Encoded library versions.
//!
//! Header-only libraries such as Boost publish their version as a single
//! integer macro (`#define BOOST_VERSION 106600`). `VersionTriple` decodes
//! that integer and formats the underscore tag used in decorated binary
//! names (`1_66`, `1_66_1`).

use std::fmt;

/// A decoded (major, minor, patch) version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        VersionTriple {
            major,
            minor,
            patch,
        }
    }

    /// Decode an encoded version.
    ///
    /// `major = v / 100000`, `minor = v / 100 % 1000`, `patch = v % 100`.
    pub fn decode(encoded: u32) -> Self {
        VersionTriple {
            major: encoded / 100_000,
            minor: encoded / 100 % 1000,
            patch: encoded % 100,
        }
    }

    /// Underscore tag used in decorated library names.
    ///
    /// A zero patch level is omitted: `1_66` rather than `1_66_0`.
    pub fn name_tag(&self) -> String {
        if self.patch == 0 {
            format!("{}_{}", self.major, self.minor)
        } else {
            format!("{}_{}_{}", self.major, self.minor, self.patch)
        }
    }

    /// Build from a semver version, if every component fits the encoding.
    pub fn from_semver(version: &semver::Version) -> Option<Self> {
        if version.minor >= 1000 || version.patch >= 100 {
            return None;
        }
        Some(VersionTriple {
            major: u32::try_from(version.major).ok()?,
            minor: version.minor as u32,
            patch: version.patch as u32,
        })
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
