//! Command implementations

pub mod probe;
pub mod resolve;
pub mod search_dirs;
pub mod toolchain;

use anyhow::{Context, Result};

use crate::cli::Cli;
use anchorage::core::ToolchainDescriptor;
use anchorage::probe::detect_toolchain;
use anchorage::util::config::load_for_project;
use anchorage::util::{Environment, ResolverContext, ResolverSettings};

/// Everything a command needs for one pass: the toolchain and a context.
pub struct Session {
    pub ctx: ResolverContext,
    pub toolchain: ToolchainDescriptor,
    pub color: bool,
}

impl Session {
    /// Load configuration for the current directory and detect the toolchain.
    ///
    /// Command-line flags win over the project config, which wins over the
    /// global config.
    pub fn new(cli: &Cli) -> Result<Self> {
        let root = std::env::current_dir().context("failed to get current directory")?;
        let mut config = load_for_project(&root);
        config.toolchain.merge(cli.toolchain.to_settings());

        let env = Environment::capture();
        let toolchain = detect_toolchain(&config.toolchain, &env)?;
        let settings = ResolverSettings::from_config(&config)?;
        let ctx = ResolverContext::new(env, root).with_settings(settings);

        Ok(Session {
            ctx,
            toolchain,
            color: !cli.no_color,
        })
    }
}
