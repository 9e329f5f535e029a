//! Per-family override files.
//!
//! A project can pin a library family by dropping a TOML link spec next to
//! the build, named `local-<family>.toml` unless `<FAMILY>_PRJ_FILE` or the
//! `[overrides]` config table names another file. When that file exists,
//! discovery for the family is skipped.

use std::path::{Path, PathBuf};

use crate::core::link_spec::LinkSpec;
use crate::resolver::errors::ResolveError;
use crate::util::context::ResolverContext;

/// Override lookup for one library family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideGate {
    family: String,
    env_var: String,
    default_name: String,
}

impl OverrideGate {
    pub fn for_family(family: &str) -> Self {
        OverrideGate {
            family: family.to_string(),
            env_var: format!("{}_PRJ_FILE", family.to_uppercase()),
            default_name: format!("local-{}.toml", family),
        }
    }

    /// Environment variable naming the override file.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Override file name: environment, then config, then the convention.
    pub fn file_name<'a>(&'a self, ctx: &'a ResolverContext) -> &'a str {
        ctx.env()
            .get_non_empty(&self.env_var)
            .or_else(|| {
                ctx.settings()
                    .override_names
                    .get(&self.family)
                    .map(String::as_str)
            })
            .unwrap_or(&self.default_name)
    }

    /// Path of the override file, if it exists.
    ///
    /// Relative names are taken from the context root.
    pub fn locate(&self, ctx: &ResolverContext) -> Option<PathBuf> {
        let path = ctx.root().join(self.file_name(ctx));
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!("no override for `{}` at {}", self.family, path.display());
            None
        }
    }

    /// Read the link spec stored in an override file.
    pub fn load(&self, path: &Path) -> Result<LinkSpec, ResolveError> {
        let invalid = |message: String| ResolveError::InvalidOverride {
            path: path.to_path_buf(),
            message,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let mut spec: LinkSpec = toml::from_str(&contents).map_err(|e| invalid(e.to_string()))?;
        if spec.logical_name.is_empty() {
            spec.logical_name = self.family.clone();
        }
        Ok(spec)
    }
}
