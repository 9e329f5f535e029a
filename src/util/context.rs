//! Resolver context for one build-configuration pass.
//!
//! Owns everything resolvers share: the environment snapshot, the working
//! root where override files live, the compiler runner, and the
//! introspection caches. A fresh context starts with empty caches, so
//! nothing leaks between passes or between tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::toolchain::ToolchainDescriptor;
use crate::core::version::VersionTriple;
use crate::probe::introspect::{self, IntrospectionCache};
use crate::resolver::errors::ResolveError;
use crate::util::config::Config;
use crate::util::env::Environment;
use crate::util::process::{DiagnosticRunner, SystemRunner};

/// Lowest Boost release the resolvers accept (1.66.0).
pub const DEFAULT_BOOST_MIN_VERSION: u32 = 106600;

/// Tunables taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Minimum accepted Boost version
    pub boost_min_version: VersionTriple,
    /// Boost libraries to link
    pub boost_components: Vec<String>,
    /// Per-family default override file names, keyed by family name
    pub override_names: BTreeMap<String, String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        ResolverSettings {
            boost_min_version: VersionTriple::decode(DEFAULT_BOOST_MIN_VERSION),
            boost_components: vec!["boost_system".to_string()],
            override_names: BTreeMap::new(),
        }
    }
}

impl ResolverSettings {
    /// Build settings from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut settings = ResolverSettings::default();

        if let Some(ref min) = config.boost.min_version {
            settings.boost_min_version = VersionTriple::from_semver(min)
                .with_context(|| format!("boost.min_version {} cannot be encoded", min))?;
        }
        if !config.boost.components.is_empty() {
            settings.boost_components = config.boost.components.clone();
        }
        settings.override_names = config.overrides.clone();

        Ok(settings)
    }
}

/// Shared state for resolver calls.
pub struct ResolverContext {
    env: Environment,
    root: PathBuf,
    scratch_dir: PathBuf,
    runner: Box<dyn DiagnosticRunner>,
    cache: IntrospectionCache,
    settings: ResolverSettings,
}

impl ResolverContext {
    /// Create a context that runs the real compiler.
    pub fn new(env: Environment, root: impl Into<PathBuf>) -> Self {
        ResolverContext {
            env,
            root: root.into(),
            scratch_dir: std::env::temp_dir(),
            runner: Box::new(SystemRunner),
            cache: IntrospectionCache::default(),
            settings: ResolverSettings::default(),
        }
    }

    /// Replace the compiler runner.
    pub fn with_runner(mut self, runner: impl DiagnosticRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Directory for throwaway probe files.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Directory that relative override file names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn runner(&self) -> &dyn DiagnosticRunner {
        self.runner.as_ref()
    }

    pub fn cache(&self) -> &IntrospectionCache {
        &self.cache
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Library search directories of `toolchain`, memoized.
    pub fn library_search_dirs(
        &self,
        toolchain: &ToolchainDescriptor,
    ) -> Result<Vec<PathBuf>, ResolveError> {
        introspect::library_search_dirs(self, toolchain)
    }

    /// Header search directories of `toolchain`, memoized.
    pub fn header_search_dirs(
        &self,
        toolchain: &ToolchainDescriptor,
    ) -> Result<Vec<PathBuf>, ResolveError> {
        introspect::header_search_dirs(self, toolchain)
    }

    /// MinGW version tag of `toolchain`, memoized.
    pub fn gcc_version_tag(&self, toolchain: &ToolchainDescriptor) -> Result<String, ResolveError> {
        introspect::gcc_version_tag(self, toolchain)
    }
}
