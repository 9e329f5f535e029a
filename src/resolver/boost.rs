//! Boost: a version-constrained library.
//!
//! The installation is found through `BOOST_ROOT`/`BOOSTROOT`, or else by
//! looking for `boost/version.hpp` in the compiler's include directories.
//! Its `BOOST_VERSION` must meet the configured minimum. Windows binaries
//! carry decorated names; POSIX installs link by plain name.

use std::path::PathBuf;

use crate::core::link_spec::{LinkPreference, LinkSpec};
use crate::core::toolchain::ToolchainDescriptor;
use crate::core::version::VersionTriple;
use crate::probe::flavor::ToolchainFlavor;
use crate::probe::mangle::{msvc_toolset, LibraryNameMangler, LinkVariant};
use crate::probe::version_header::VersionHeaderReader;
use crate::resolver::errors::ResolveError;
use crate::resolver::LibraryResolver;
use crate::util::context::ResolverContext;
use crate::util::fs::file_exists;

/// Variables naming the Boost root, in lookup order.
pub const ROOT_VARS: [&str; 2] = ["BOOST_ROOT", "BOOSTROOT"];

/// Header holding `BOOST_VERSION`, relative to an include directory.
pub const VERSION_HEADER: &str = "boost/version.hpp";

const VERSION_MACRO: &str = "BOOST_VERSION";

/// Where the Boost headers were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoostInstall {
    /// Explicitly configured root, if any
    pub root: Option<PathBuf>,
    /// Directory containing `boost/version.hpp`
    pub include_dir: PathBuf,
    /// Decoded `BOOST_VERSION`
    pub version: VersionTriple,
}

impl BoostInstall {
    pub fn header(&self) -> PathBuf {
        self.include_dir.join(VERSION_HEADER)
    }
}

/// Resolver for Boost binary libraries.
#[derive(Debug, Clone)]
pub struct BoostResolver {
    components: Vec<String>,
    variant: LinkVariant,
}

impl BoostResolver {
    /// Link the given Boost libraries (`boost_system`, `boost_regex`, ...).
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BoostResolver {
            components: components.into_iter().map(Into::into).collect(),
            variant: LinkVariant::Default,
        }
    }

    pub fn with_variant(mut self, variant: LinkVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Locate the headers and check the version.
    pub fn find_install(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<BoostInstall, ResolveError> {
        let root = ROOT_VARS
            .iter()
            .find_map(|var| ctx.env().get_non_empty(var))
            .map(PathBuf::from);

        let include_dir = match root {
            Some(ref root) => {
                if !file_exists(root, VERSION_HEADER) {
                    return Err(ResolveError::FileUnreadable {
                        path: root.join(VERSION_HEADER),
                        reason: "file not found under the configured Boost root".to_string(),
                        searched: vec![root.clone()],
                    });
                }
                root.clone()
            }
            None => {
                let dirs = ctx.header_search_dirs(toolchain)?;
                match dirs.iter().find(|dir| file_exists(dir, VERSION_HEADER)) {
                    Some(dir) => dir.clone(),
                    None => {
                        return Err(ResolveError::FileUnreadable {
                            path: PathBuf::from(VERSION_HEADER),
                            reason: "Boost not found in include directories".to_string(),
                            searched: dirs,
                        })
                    }
                }
            }
        };

        let header = include_dir.join(VERSION_HEADER);
        let encoded = ctx.cache().header_version(&header, || {
            VersionHeaderReader::new(VERSION_MACRO).read(&header)
        })?;
        let version = VersionTriple::decode(encoded);

        let required = ctx.settings().boost_min_version;
        if version < required {
            return Err(ResolveError::VersionTooLow {
                library: "boost".to_string(),
                found: version,
                required,
                header,
            });
        }

        tracing::debug!("boost {} in {}", version, include_dir.display());
        Ok(BoostInstall {
            root,
            include_dir,
            version,
        })
    }
}

impl LibraryResolver for BoostResolver {
    fn name(&self) -> &str {
        "boost"
    }

    fn discover(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<LinkSpec, ResolveError> {
        let install = self.find_install(ctx, toolchain)?;
        let flavor = ToolchainFlavor::of(toolchain);

        let mangler = match flavor {
            ToolchainFlavor::MinGw => LibraryNameMangler::new(self.variant)
                .with_gcc_version_tag(ctx.gcc_version_tag(toolchain)?),
            _ => LibraryNameMangler::new(self.variant),
        };

        let mut spec = LinkSpec::new("boost");
        for component in &self.components {
            spec = spec.token(mangler.mangle(component, toolchain, &install.version)?);
        }

        if !flavor.decorates_names() {
            spec = spec.with_linkage(match self.variant {
                LinkVariant::Shared => LinkPreference::Shared,
                _ => LinkPreference::Static,
            });
        }

        if let Some(root) = install.root {
            if flavor == ToolchainFlavor::Msvc {
                let toolset = msvc_toolset(toolchain)?;
                let lib_dir = format!("lib{}-{}", toolchain.bits, toolset.dir_tag);
                spec = spec.search_path(root.join(lib_dir));
            }
            spec = spec.include_dir(root);
        }

        Ok(spec)
    }
}
