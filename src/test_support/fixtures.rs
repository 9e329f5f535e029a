//! Test fixtures for common resolution scenarios.
//!
//! Toolchain presets, on-disk library trees, and canned compiler output.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::toolchain::{
    ArchBits, CompilerFamily, RuntimeLinkage, TargetOs, ToolchainDescriptor,
};

/// GCC on Linux, 64-bit, shared runtime.
pub fn gcc_posix() -> ToolchainDescriptor {
    ToolchainDescriptor::new(CompilerFamily::Gcc)
        .with_target_os(TargetOs::Posix)
        .with_bits(ArchBits::X64)
}

/// GCC on Linux, 64-bit, static runtime.
pub fn gcc_posix_static() -> ToolchainDescriptor {
    gcc_posix().with_linkage(RuntimeLinkage::Static)
}

/// MinGW GCC, 64-bit.
pub fn mingw(linkage: RuntimeLinkage) -> ToolchainDescriptor {
    ToolchainDescriptor::new(CompilerFamily::Gcc)
        .with_target_os(TargetOs::Windows)
        .with_bits(ArchBits::X64)
        .with_linkage(linkage)
}

/// MSVC with the given Visual Studio version tag, 64-bit.
pub fn msvc(version_tag: &str) -> ToolchainDescriptor {
    ToolchainDescriptor::new(CompilerFamily::Msvc)
        .with_version_tag(version_tag)
        .with_bits(ArchBits::X64)
}

/// A set of numbered library directories in a temp dir.
///
/// The directories are removed when the fixture is dropped.
#[derive(Debug)]
pub struct LibraryTree {
    tmp: TempDir,
    dirs: Vec<PathBuf>,
}

impl LibraryTree {
    /// Create `count` empty directories named `dir0`, `dir1`, ...
    pub fn new(count: usize) -> Self {
        let tmp = TempDir::new().unwrap();
        let dirs = (0..count)
            .map(|i| {
                let dir = tmp.path().join(format!("dir{}", i));
                std::fs::create_dir_all(&dir).unwrap();
                dir
            })
            .collect();
        LibraryTree { tmp, dirs }
    }

    /// Create empty files in directory `index`.
    pub fn with_files(self, index: usize, names: &[&str]) -> Self {
        for name in names {
            let path = self.dirs[index].join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, "").unwrap();
        }
        self
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn dir(&self, index: usize) -> &Path {
        &self.dirs[index]
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The directories as a `LIB`/`INCLUDE` style `;` list.
    pub fn env_list(&self) -> String {
        join_dirs(&self.dirs, ';')
    }
}

/// Write `<dir>/boost/version.hpp` defining `BOOST_VERSION`.
pub fn write_version_header(dir: &Path, encoded: u32) -> PathBuf {
    let boost = dir.join("boost");
    std::fs::create_dir_all(&boost).unwrap();
    let header = boost.join("version.hpp");
    std::fs::write(
        &header,
        format!(
            "//  Boost version.hpp configuration header file\n\
             #ifndef BOOST_VERSION_HPP\n\
             #define BOOST_VERSION_HPP\n\
             \n\
             //  BOOST_VERSION % 100 is the patch level\n\
             #define BOOST_VERSION {}\n\
             #define BOOST_LIB_VERSION \"{}_{}\"\n\
             \n\
             #endif\n",
            encoded,
            encoded / 100_000,
            encoded / 100 % 1000
        ),
    )
    .unwrap();
    header
}

/// `g++ -print-search-dirs` output listing `dirs`.
pub fn search_dirs_output<P: AsRef<Path>>(dirs: &[P], separator: char) -> String {
    format!(
        "install: /usr/lib/gcc/x86_64-linux-gnu/11/\n\
         programs: =/usr/lib/gcc/x86_64-linux-gnu/11/:/usr/bin/\n\
         libraries: ={}\n",
        join_dirs(dirs, separator)
    )
}

/// `g++ -E -x c++ - -v` output listing `dirs` as include directories.
pub fn include_dirs_output<P: AsRef<Path>>(dirs: &[P]) -> String {
    let mut output = String::from(
        "Using built-in specs.\n\
         COLLECT_GCC=g++\n\
         ignoring nonexistent directory \"/usr/local/include/x86_64-linux-gnu\"\n\
         #include \"...\" search starts here:\n\
         #include <...> search starts here:\n",
    );
    for dir in dirs {
        output.push_str(&format!(" {}\n", dir.as_ref().display()));
    }
    output.push_str("End of search list.\n");
    output
}

/// `g++ -v` output of a MinGW GCC.
pub fn mingw_version_output(major: u32, minor: u32) -> String {
    format!(
        "Using built-in specs.\n\
         Target: x86_64-w64-mingw32\n\
         Thread model: posix\n\
         gcc version {}.{}.0 (x86_64-posix-seh-rev0, Built by MinGW-W64 project)\n",
        major, minor
    )
}

fn join_dirs<P: AsRef<Path>>(dirs: &[P], separator: char) -> String {
    dirs.iter()
        .map(|d| d.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}
