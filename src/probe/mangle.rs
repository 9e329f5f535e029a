//! Decorated names of versioned binary libraries.
//!
//! Boost's Windows builds embed the toolset, threading model, runtime flags,
//! architecture and version in every file name:
//!
//! ```text
//! libboost_system-vc141-mt-sgd-x64-1_66.lib    (MSVC, static)
//! boost_system-vc141-mt-gd-x64-1_66.lib        (MSVC, dll import lib)
//! boost_system-mgw71-mt-sd-x64-1_66.a          (MinGW, static runtime)
//! boost_system-mgw71-mt-x64-1_66.dll.a         (MinGW, dll)
//! ```
//!
//! POSIX installs use plain names. New MSVC releases only need a row in
//! [`MSVC_TOOLSETS`].

use crate::core::toolchain::ToolchainDescriptor;
use crate::core::version::VersionTriple;
use crate::probe::flavor::ToolchainFlavor;
use crate::resolver::errors::ResolveError;

/// Naming data for one MSVC toolset generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsvcToolset {
    /// Visual Studio major version ("15" for VS 2017)
    pub major: u32,
    /// Tag embedded in library names
    pub name_tag: &'static str,
    /// Suffix of the binary directory inside a Boost root (`lib64-msvc-14.1`)
    pub dir_tag: &'static str,
}

pub const MSVC_TOOLSETS: &[MsvcToolset] = &[
    MsvcToolset {
        major: 14,
        name_tag: "vc140",
        dir_tag: "msvc-14.0",
    },
    MsvcToolset {
        major: 15,
        name_tag: "vc141",
        dir_tag: "msvc-14.1",
    },
    MsvcToolset {
        major: 16,
        name_tag: "vc142",
        dir_tag: "msvc-14.2",
    },
    MsvcToolset {
        major: 17,
        name_tag: "vc143",
        dir_tag: "msvc-14.3",
    },
];

/// Look up the MSVC toolset row for a toolchain.
pub fn msvc_toolset(
    toolchain: &ToolchainDescriptor,
) -> Result<&'static MsvcToolset, ResolveError> {
    let unsupported = |reason: String| ResolveError::UnsupportedToolchain {
        toolchain: toolchain.to_string(),
        reason,
    };

    let major = toolchain
        .version_major()
        .ok_or_else(|| unsupported("MSVC version is unknown".to_string()))?;

    MSVC_TOOLSETS
        .iter()
        .find(|row| row.major == major)
        .ok_or_else(|| {
            let known: Vec<String> = MSVC_TOOLSETS.iter().map(|r| r.major.to_string()).collect();
            unsupported(format!(
                "no library naming rule for MSVC {}; supported: {}",
                major,
                known.join(", ")
            ))
        })
}

/// Which flavor of a versioned library the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkVariant {
    /// No explicit request
    #[default]
    Default,
    /// Explicitly the static library
    Static,
    /// Explicitly the shared library (dll)
    Shared,
}

impl LinkVariant {
    /// Interpret a user switch value (`static`, `shared`, anything else).
    pub fn from_switch(value: &str) -> Self {
        match value {
            "static" => LinkVariant::Static,
            "shared" => LinkVariant::Shared,
            _ => LinkVariant::Default,
        }
    }
}

/// Computes decorated library names.
#[derive(Debug, Clone, Default)]
pub struct LibraryNameMangler {
    variant: LinkVariant,
    gcc_version_tag: Option<String>,
}

impl LibraryNameMangler {
    pub fn new(variant: LinkVariant) -> Self {
        LibraryNameMangler {
            variant,
            gcc_version_tag: None,
        }
    }

    /// Set the MinGW tag (`mgw71`); required for GCC-style Windows toolchains.
    pub fn with_gcc_version_tag(mut self, tag: impl Into<String>) -> Self {
        self.gcc_version_tag = Some(tag.into());
        self
    }

    /// Decorate `name` for `toolchain`.
    pub fn mangle(
        &self,
        name: &str,
        toolchain: &ToolchainDescriptor,
        version: &VersionTriple,
    ) -> Result<String, ResolveError> {
        match ToolchainFlavor::of(toolchain) {
            ToolchainFlavor::Msvc => self.mangle_msvc(name, toolchain, version),
            ToolchainFlavor::MinGw => self.mangle_mingw(name, toolchain, version),
            ToolchainFlavor::Posix => Ok(name.to_string()),
        }
    }

    fn mangle_msvc(
        &self,
        name: &str,
        toolchain: &ToolchainDescriptor,
        version: &VersionTriple,
    ) -> Result<String, ResolveError> {
        let toolset = msvc_toolset(toolchain)?;
        let shared = self.variant == LinkVariant::Shared;

        let mut flags = String::new();
        if !shared && toolchain.is_static_runtime() {
            flags.push('s');
        }
        if toolchain.is_debug() {
            flags.push_str("gd");
        }

        Ok(format!(
            "{}{}-{}-mt{}-x{}-{}",
            if shared { "" } else { "lib" },
            name,
            toolset.name_tag,
            flag_segment(&flags),
            toolchain.bits,
            version.name_tag()
        ))
    }

    fn mangle_mingw(
        &self,
        name: &str,
        toolchain: &ToolchainDescriptor,
        version: &VersionTriple,
    ) -> Result<String, ResolveError> {
        let tag = self
            .gcc_version_tag
            .as_deref()
            .ok_or_else(|| ResolveError::UnsupportedToolchain {
                toolchain: toolchain.to_string(),
                reason: "gcc version tag is unknown".to_string(),
            })?;

        let mut flags = String::new();
        if self.variant == LinkVariant::Static && toolchain.is_static_runtime() {
            flags.push('s');
        }
        if toolchain.is_debug() {
            flags.push('d');
        }

        let mut mangled = format!(
            "{}-{}-mt{}-x{}-{}",
            name,
            tag,
            flag_segment(&flags),
            toolchain.bits,
            version.name_tag()
        );
        if self.variant == LinkVariant::Shared {
            mangled.push_str(".dll");
        }
        Ok(mangled)
    }
}

fn flag_segment(flags: &str) -> String {
    if flags.is_empty() {
        String::new()
    } else {
        format!("-{}", flags)
    }
}
