//! Toolchain flavors.
//!
//! Search-path discovery and library naming differ along one axis: is this
//! MSVC, a GCC-style compiler targeting Windows (MinGW decoration), or a
//! GCC-style compiler on a POSIX system (plain names)? Everything that
//! branches on that question matches on [`ToolchainFlavor`].

use crate::core::toolchain::{CompilerFamily, TargetOs, ToolchainDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolchainFlavor {
    /// Microsoft Visual C++: search paths from `LIB`/`INCLUDE`, vcXXX names
    Msvc,
    /// GCC/Clang targeting Windows: compiler search paths, mgwXX names
    MinGw,
    /// GCC/Clang on POSIX: compiler search paths, plain names
    Posix,
}

impl ToolchainFlavor {
    /// Classify a toolchain.
    pub fn of(toolchain: &ToolchainDescriptor) -> Self {
        match (toolchain.family, toolchain.target_os) {
            (CompilerFamily::Msvc, _) => ToolchainFlavor::Msvc,
            (_, TargetOs::Windows) => ToolchainFlavor::MinGw,
            (_, TargetOs::Posix) => ToolchainFlavor::Posix,
        }
    }

    /// Separator of the `libraries: =` list printed by `-print-search-dirs`.
    pub fn search_dir_separator(&self) -> char {
        match self {
            ToolchainFlavor::Posix => ':',
            ToolchainFlavor::Msvc | ToolchainFlavor::MinGw => ';',
        }
    }

    /// Whether versioned binary libraries carry decorated names.
    pub fn decorates_names(&self) -> bool {
        !matches!(self, ToolchainFlavor::Posix)
    }

    /// Whether search paths come from the environment instead of the compiler.
    pub fn uses_environment_paths(&self) -> bool {
        matches!(self, ToolchainFlavor::Msvc)
    }

    /// File name patterns (prefix, suffix) a linker accepts, in preference order.
    fn file_patterns(
        &self,
        toolchain: &ToolchainDescriptor,
    ) -> &'static [(&'static str, &'static str)] {
        match self {
            ToolchainFlavor::Msvc => &[("", ".lib")],
            ToolchainFlavor::MinGw if toolchain.is_static_runtime() => &[("lib", ".a")],
            ToolchainFlavor::MinGw => &[("lib", ".dll.a"), ("lib", ".a")],
            ToolchainFlavor::Posix if toolchain.is_static_runtime() => &[("lib", ".a")],
            ToolchainFlavor::Posix => &[("lib", ".so"), ("lib", ".dylib"), ("lib", ".a")],
        }
    }

    /// Candidate file sets for linking all of `stems`, in preference order.
    ///
    /// Each alternative is a complete set; a directory matches an
    /// alternative only if it holds every file of it.
    pub fn library_files<S: AsRef<str>>(
        &self,
        toolchain: &ToolchainDescriptor,
        stems: &[S],
    ) -> Vec<Vec<String>> {
        self.file_patterns(toolchain)
            .iter()
            .map(|(prefix, suffix)| {
                stems
                    .iter()
                    .map(|stem| format!("{}{}{}", prefix, stem.as_ref(), suffix))
                    .collect()
            })
            .collect()
    }
}
