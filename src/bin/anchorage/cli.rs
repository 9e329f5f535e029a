//! CLI definitions using clap.

use std::path::PathBuf;

use anchorage::core::toolchain::{
    ArchBits, CompilerFamily, RuntimeLinkage, RuntimeMode, TargetOs,
};
use anchorage::resolver::Family;
use anchorage::util::config::ToolchainSettings;
use clap::{Args, Parser, Subcommand};

/// Anchorage - locate native libraries and print how to link them
#[derive(Parser)]
#[command(name = "anchorage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub toolchain: ToolchainFlags,

    #[command(subcommand)]
    pub command: Commands,
}

/// Toolchain fields that override configuration and detection.
#[derive(Args, Default)]
pub struct ToolchainFlags {
    /// Compiler family (msvc, gcc, clang)
    #[arg(long, global = true)]
    pub family: Option<CompilerFamily>,

    /// Compiler driver used for introspection
    #[arg(long, global = true)]
    pub compiler: Option<PathBuf>,

    /// Compiler version tag ("15" for VS 2017, "mgw71" for MinGW 7.1)
    #[arg(long, global = true)]
    pub compiler_version: Option<String>,

    /// Target OS class (windows, posix)
    #[arg(long, global = true)]
    pub os: Option<TargetOs>,

    /// Architecture width (32, 64)
    #[arg(long, global = true)]
    pub bits: Option<ArchBits>,

    /// Runtime library linkage (static, shared)
    #[arg(long, global = true)]
    pub linkage: Option<RuntimeLinkage>,

    /// Runtime library mode (release, debug)
    #[arg(long, global = true)]
    pub runtime: Option<RuntimeMode>,
}

impl ToolchainFlags {
    pub fn to_settings(&self) -> ToolchainSettings {
        ToolchainSettings {
            compiler: self.compiler.clone(),
            family: self.family,
            version_tag: self.compiler_version.clone(),
            target_os: self.os,
            bits: self.bits,
            linkage: self.linkage,
            mode: self.runtime,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective toolchain
    Toolchain,

    /// List the compiler's search directories in order
    SearchDirs(SearchDirsArgs),

    /// Report which library families are available
    Probe,

    /// Resolve one library family to a link specification
    Resolve(ResolveArgs),
}

#[derive(Args)]
pub struct SearchDirsArgs {
    /// List header directories instead of library directories
    #[arg(long)]
    pub headers: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Library family (boost, openssl, pcre, pcre2, zlib)
    pub library: Family,

    /// Print the link specification as JSON
    #[arg(long)]
    pub json: bool,

    /// Fall back to conventional names when the library is not found
    #[arg(long)]
    pub best_effort: bool,
}
