//! Toolchain descriptor.
//!
//! A `ToolchainDescriptor` captures everything about the active compiler
//! that influences where native libraries live and how they are named:
//! compiler family and version, target OS, architecture width, and the
//! runtime library mode. It is built once per build pass and never mutated.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    /// Microsoft Visual C++
    Msvc,
    /// GCC (GNU Compiler Collection), including MinGW
    Gcc,
    /// Clang/LLVM
    Clang,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
        }
    }

    /// Default compiler driver for this family.
    pub fn default_compiler(&self) -> &'static str {
        match self {
            CompilerFamily::Msvc => "cl",
            CompilerFamily::Gcc => "g++",
            CompilerFamily::Clang => "clang++",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "msvc" | "vc" | "cl" => Ok(CompilerFamily::Msvc),
            "gcc" | "g++" | "mingw" => Ok(CompilerFamily::Gcc),
            "clang" | "clang++" => Ok(CompilerFamily::Clang),
            _ => Err(format!(
                "invalid compiler family '{}'; expected 'msvc', 'gcc', or 'clang'",
                s
            )),
        }
    }
}

/// Target operating system class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Windows,
    Posix,
}

impl TargetOs {
    /// Detect the host OS class.
    pub fn host() -> Self {
        if cfg!(windows) {
            TargetOs::Windows
        } else {
            TargetOs::Posix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Posix => "posix",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" | "mswin" => Ok(TargetOs::Windows),
            "posix" | "unix" | "linux" | "macos" | "darwin" => Ok(TargetOs::Posix),
            _ => Err(format!(
                "invalid target os '{}'; expected 'windows' or 'posix'",
                s
            )),
        }
    }
}

/// Architecture width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ArchBits {
    X32,
    X64,
}

impl ArchBits {
    /// Detect the host pointer width.
    pub fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            ArchBits::X64
        } else {
            ArchBits::X32
        }
    }

    /// Width as a number (32 or 64).
    pub fn as_u8(&self) -> u8 {
        match self {
            ArchBits::X32 => 32,
            ArchBits::X64 => 64,
        }
    }
}

impl TryFrom<u8> for ArchBits {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            32 => Ok(ArchBits::X32),
            64 => Ok(ArchBits::X64),
            other => Err(format!("invalid architecture width {}; expected 32 or 64", other)),
        }
    }
}

impl From<ArchBits> for u8 {
    fn from(bits: ArchBits) -> u8 {
        bits.as_u8()
    }
}

impl fmt::Display for ArchBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl FromStr for ArchBits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start_matches('x');
        let value: u8 = trimmed
            .parse()
            .map_err(|_| format!("invalid architecture width '{}'", s))?;
        ArchBits::try_from(value)
    }
}

/// Runtime library linkage (static vs shared CRT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeLinkage {
    Static,
    #[default]
    Shared,
}

impl fmt::Display for RuntimeLinkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeLinkage::Static => f.write_str("static"),
            RuntimeLinkage::Shared => f.write_str("shared"),
        }
    }
}

impl FromStr for RuntimeLinkage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(RuntimeLinkage::Static),
            "shared" | "dynamic" => Ok(RuntimeLinkage::Shared),
            _ => Err(format!(
                "invalid runtime linkage '{}'; expected 'static' or 'shared'",
                s
            )),
        }
    }
}

/// Runtime library mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Release,
    Debug,
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeMode::Release => f.write_str("release"),
            RuntimeMode::Debug => f.write_str("debug"),
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "release" => Ok(RuntimeMode::Release),
            "debug" => Ok(RuntimeMode::Debug),
            _ => Err(format!(
                "invalid runtime mode '{}'; expected 'release' or 'debug'",
                s
            )),
        }
    }
}

/// Description of the active compiler toolchain.
///
/// Used as the cache key for every introspection result, so two
/// descriptors that differ in any field never share cached search paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolchainDescriptor {
    /// Compiler family
    pub family: CompilerFamily,
    /// Compiler driver used for introspection (e.g. "g++", "/usr/bin/clang++")
    pub compiler: PathBuf,
    /// Compiler version tag (for MSVC, the toolset major version such as "15")
    pub version_tag: String,
    /// Target OS class
    pub target_os: TargetOs,
    /// Architecture width
    pub bits: ArchBits,
    /// Runtime library linkage
    pub linkage: RuntimeLinkage,
    /// Runtime library mode
    pub mode: RuntimeMode,
}

impl ToolchainDescriptor {
    /// Create a descriptor with host defaults for everything but the family.
    pub fn new(family: CompilerFamily) -> Self {
        ToolchainDescriptor {
            family,
            compiler: PathBuf::from(family.default_compiler()),
            version_tag: String::new(),
            target_os: match family {
                CompilerFamily::Msvc => TargetOs::Windows,
                _ => TargetOs::host(),
            },
            bits: ArchBits::host(),
            linkage: RuntimeLinkage::default(),
            mode: RuntimeMode::default(),
        }
    }

    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_version_tag(mut self, tag: impl Into<String>) -> Self {
        self.version_tag = tag.into();
        self
    }

    pub fn with_target_os(mut self, os: TargetOs) -> Self {
        self.target_os = os;
        self
    }

    pub fn with_bits(mut self, bits: ArchBits) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_linkage(mut self, linkage: RuntimeLinkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the compiler driver path.
    pub fn compiler_path(&self) -> &Path {
        &self.compiler
    }

    /// True when targeting Windows.
    pub fn is_windows(&self) -> bool {
        self.target_os == TargetOs::Windows
    }

    pub fn is_static_runtime(&self) -> bool {
        self.linkage == RuntimeLinkage::Static
    }

    pub fn is_debug(&self) -> bool {
        self.mode == RuntimeMode::Debug
    }

    /// Major component of the version tag ("15.9" -> 15).
    pub fn version_major(&self) -> Option<u32> {
        self.version_tag
            .split(['.', '-'])
            .next()
            .and_then(|major| major.trim().parse().ok())
    }
}

impl fmt::Display for ToolchainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if !self.version_tag.is_empty() {
            write!(f, "-{}", self.version_tag)?;
        }
        write!(
            f,
            " ({}, x{}, {} runtime, {})",
            self.target_os, self.bits, self.linkage, self.mode
        )
    }
}
