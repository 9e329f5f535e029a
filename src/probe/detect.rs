//! Toolchain detection.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::toolchain::{CompilerFamily, TargetOs, ToolchainDescriptor};
use crate::util::config::ToolchainSettings;
use crate::util::env::Environment;
use crate::util::process::find_cxx_compiler;

/// Build the toolchain descriptor for this pass.
///
/// Explicit settings win. Otherwise:
/// 1. The compiler is `CXX` or the first of c++/g++/clang++/cl on PATH
/// 2. The family is inferred from the compiler's file name
/// 3. OS and width default to the host; MSVC always targets Windows
/// 4. MSVC's version comes from `VisualStudioVersion` (set by the developer prompt)
pub fn detect_toolchain(
    settings: &ToolchainSettings,
    env: &Environment,
) -> Result<ToolchainDescriptor> {
    let (family, compiler) = match (settings.family, settings.compiler.clone()) {
        (Some(family), Some(compiler)) => (family, compiler),
        (Some(family), None) => (family, PathBuf::from(family.default_compiler())),
        (None, Some(compiler)) => (infer_family(&compiler), compiler),
        (None, None) => {
            let Some(compiler) = find_cxx_compiler(env) else {
                bail!(
                    "no C++ compiler found\n\
                     \n\
                     Set the CXX environment variable, configure [toolchain] in\n\
                     .anchorage/config.toml, or install a compiler."
                );
            };
            (infer_family(&compiler), compiler)
        }
    };

    let mut toolchain = ToolchainDescriptor::new(family).with_compiler(compiler);

    if let Some(os) = settings.target_os {
        toolchain = toolchain.with_target_os(os);
    }
    if family == CompilerFamily::Msvc && toolchain.target_os != TargetOs::Windows {
        bail!("MSVC can only target windows, not {}", toolchain.target_os);
    }
    if let Some(bits) = settings.bits {
        toolchain = toolchain.with_bits(bits);
    }
    if let Some(linkage) = settings.linkage {
        toolchain = toolchain.with_linkage(linkage);
    }
    if let Some(mode) = settings.mode {
        toolchain = toolchain.with_mode(mode);
    }

    let version_tag = settings.version_tag.clone().or_else(|| match family {
        CompilerFamily::Msvc => env.get_non_empty("VisualStudioVersion").map(str::to_string),
        _ => None,
    });
    if let Some(tag) = version_tag {
        toolchain = toolchain.with_version_tag(tag);
    }

    tracing::debug!("using toolchain {}", toolchain);
    Ok(toolchain)
}

/// Guess the compiler family from a driver path.
///
/// Cross-compiler prefixes are tolerated (`x86_64-w64-mingw32-g++`).
pub fn infer_family(compiler: &Path) -> CompilerFamily {
    let stem = compiler
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if stem == "cl" || stem == "clang-cl" {
        CompilerFamily::Msvc
    } else if stem.contains("clang") {
        CompilerFamily::Clang
    } else {
        CompilerFamily::Gcc
    }
}
