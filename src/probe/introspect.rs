//! Compiler search-path introspection.
//!
//! GCC-style drivers report their default library directories with
//! `-print-search-dirs` and their header directories with `-E -v` on an
//! empty translation unit. MSVC has no such switch; the developer prompt
//! exports the same information as `LIB` and `INCLUDE`.
//!
//! Every successful answer is memoized in the [`IntrospectionCache`] owned
//! by the resolver context, keyed by the full toolchain descriptor.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::toolchain::ToolchainDescriptor;
use crate::probe::flavor::ToolchainFlavor;
use crate::resolver::errors::ResolveError;
use crate::util::context::ResolverContext;
use crate::util::fs::ProbeSource;
use crate::util::process::DiagnosticRequest;

const LIBRARIES_PREFIX: &str = "libraries: =";
const INCLUDE_START: &str = "#include <...> search starts here:";
const INCLUDE_END: &str = "End of search list.";
const FRAMEWORK_SUFFIX: &str = " (framework directory)";

static GCC_VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^gcc version (\d+)\.(\d+)").expect("gcc version pattern is valid")
});

/// Process-lifetime memoization of introspection results.
///
/// Only successful lookups are stored; a failed compiler invocation is
/// retried on the next query.
#[derive(Debug, Default)]
pub struct IntrospectionCache {
    library_dirs: RefCell<HashMap<ToolchainDescriptor, Vec<PathBuf>>>,
    header_dirs: RefCell<HashMap<ToolchainDescriptor, Vec<PathBuf>>>,
    gcc_tags: RefCell<HashMap<ToolchainDescriptor, String>>,
    versions: RefCell<HashMap<PathBuf, u32>>,
}

impl IntrospectionCache {
    /// Encoded version read from a header, memoized by path.
    pub fn header_version<F>(&self, header: &Path, read: F) -> Result<u32, ResolveError>
    where
        F: FnOnce() -> Result<u32, ResolveError>,
    {
        memoize(&self.versions, &header.to_path_buf(), read)
    }
}

fn memoize<K, V, F>(
    cache: &RefCell<HashMap<K, V>>,
    key: &K,
    compute: F,
) -> Result<V, ResolveError>
where
    K: Eq + Hash + Clone,
    V: Clone,
    F: FnOnce() -> Result<V, ResolveError>,
{
    if let Some(hit) = cache.borrow().get(key).cloned() {
        return Ok(hit);
    }
    let value = compute()?;
    cache.borrow_mut().insert(key.clone(), value.clone());
    Ok(value)
}

/// Default library search directories of the toolchain, in linker order.
pub fn library_search_dirs(
    ctx: &ResolverContext,
    toolchain: &ToolchainDescriptor,
) -> Result<Vec<PathBuf>, ResolveError> {
    memoize(&ctx.cache().library_dirs, toolchain, || {
        let flavor = ToolchainFlavor::of(toolchain);
        if flavor.uses_environment_paths() {
            return Ok(ctx.env().path_list("LIB"));
        }

        let request =
            DiagnosticRequest::new(toolchain.compiler_path()).args(["-print-search-dirs"]);
        let output = run(ctx, &request)?;
        parse_library_dirs(&output, flavor.search_dir_separator()).ok_or_else(|| {
            ResolveError::Introspection {
                command: request.display_command(),
                message: format!("no `{}` line in compiler output", LIBRARIES_PREFIX),
            }
        })
    })
}

/// Default header search directories of the toolchain, in lookup order.
pub fn header_search_dirs(
    ctx: &ResolverContext,
    toolchain: &ToolchainDescriptor,
) -> Result<Vec<PathBuf>, ResolveError> {
    memoize(&ctx.cache().header_dirs, toolchain, || {
        if ToolchainFlavor::of(toolchain).uses_environment_paths() {
            return Ok(ctx.env().path_list("INCLUDE"));
        }

        // Removed when `probe` goes out of scope, whatever run() returns.
        let probe = ProbeSource::create_in(ctx.scratch_dir()).map_err(|e| {
            ResolveError::Introspection {
                command: format!("{} -E -x c++ - -v", toolchain.compiler_path().display()),
                message: format!("{:#}", e),
            }
        })?;
        let request = DiagnosticRequest::new(toolchain.compiler_path())
            .args(["-E", "-x", "c++", "-", "-v"])
            .stdin(probe.path());
        let output = run(ctx, &request)?;
        parse_include_dirs(&output).ok_or_else(|| ResolveError::Introspection {
            command: request.display_command(),
            message: format!("no `{}` marker in compiler output", INCLUDE_START),
        })
    })
}

/// MinGW library tag (`mgw71`) of a GCC toolchain.
///
/// A descriptor whose version tag is already an `mgw` tag is taken as is.
pub fn gcc_version_tag(
    ctx: &ResolverContext,
    toolchain: &ToolchainDescriptor,
) -> Result<String, ResolveError> {
    if toolchain.version_tag.starts_with("mgw") {
        return Ok(toolchain.version_tag.clone());
    }

    memoize(&ctx.cache().gcc_tags, toolchain, || {
        let request = DiagnosticRequest::new(toolchain.compiler_path()).args(["-v"]);
        let output = run(ctx, &request)?;
        parse_gcc_version_tag(&output).ok_or_else(|| ResolveError::Introspection {
            command: request.display_command(),
            message: "unable to detect gcc version".to_string(),
        })
    })
}

fn run(ctx: &ResolverContext, request: &DiagnosticRequest) -> Result<String, ResolveError> {
    tracing::debug!("introspecting `{}`", request.display_command());
    ctx.runner()
        .run(request)
        .map_err(|e| ResolveError::Introspection {
            command: request.display_command(),
            message: format!("{:#}", e),
        })
}

/// Parse the `libraries: =` line of `-print-search-dirs` output.
///
/// Returns `None` when the line is missing.
pub fn parse_library_dirs(output: &str, separator: char) -> Option<Vec<PathBuf>> {
    let list = output
        .lines()
        .find_map(|line| line.strip_prefix(LIBRARIES_PREFIX))?;

    Some(
        list.trim_end()
            .split(separator)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .collect(),
    )
}

/// Parse the include search list printed by `-E -v`.
///
/// Returns `None` when the start marker is missing.
pub fn parse_include_dirs(output: &str) -> Option<Vec<PathBuf>> {
    let mut lines = output.lines();
    lines.find(|line| line.trim() == INCLUDE_START)?;

    let dirs = lines
        .take_while(|line| line.trim() != INCLUDE_END)
        .map(str::trim)
        .map(|line| line.strip_suffix(FRAMEWORK_SUFFIX).unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();
    Some(dirs)
}

/// Extract `mgw<MAJOR><MINOR>` from `-v` output.
pub fn parse_gcc_version_tag(output: &str) -> Option<String> {
    let caps = GCC_VERSION_LINE.captures(output)?;
    Some(format!("mgw{}{}", &caps[1], &caps[2]))
}
