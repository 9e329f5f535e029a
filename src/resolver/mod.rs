//! Native library resolution.
//!
//! Each library family implements [`LibraryResolver`]. The provided methods
//! apply the same policy to every family:
//!
//! - an override file for the family short-circuits discovery entirely
//! - `resolve` is strict and reports absence as [`ResolveError::NotFound`]
//! - `is_available` never fails; every error becomes `false`
//! - `resolve_best_effort` falls back to conventional names when the
//!   library is merely absent

pub mod asio;
pub mod boost;
pub mod errors;
pub mod openssl;
pub mod override_gate;
pub mod platform;
pub mod selection;
pub mod simple;

pub use boost::BoostResolver;
pub use errors::ResolveError;
pub use openssl::OpenSslResolver;
pub use override_gate::OverrideGate;
pub use selection::Selection;
pub use simple::SimpleLibrary;

use std::fmt;
use std::str::FromStr;

use crate::core::link_spec::LinkSpec;
use crate::core::toolchain::ToolchainDescriptor;
use crate::util::context::ResolverContext;

/// Locates one family of native libraries.
pub trait LibraryResolver {
    /// Family name ("openssl"); also names the family's override file.
    fn name(&self) -> &str;

    /// Search the system, ignoring any override file.
    fn discover(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<LinkSpec, ResolveError>;

    /// Conventional spec to use when discovery finds nothing.
    fn fallback(&self, _toolchain: &ToolchainDescriptor) -> Option<LinkSpec> {
        None
    }

    /// Produce the link specification for this family.
    fn resolve(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<LinkSpec, ResolveError> {
        let gate = OverrideGate::for_family(self.name());
        if let Some(path) = gate.locate(ctx) {
            tracing::info!("using override {} for `{}`", path.display(), self.name());
            return gate.load(&path);
        }

        let spec = self.discover(ctx, toolchain)?;
        tracing::info!("resolved `{}`: {}", self.name(), spec.link_tokens.join(" "));
        Ok(spec)
    }

    /// Whether `resolve` would produce a spec.
    ///
    /// The presence of an override file is enough; its content is not read.
    fn is_available(&self, ctx: &ResolverContext, toolchain: &ToolchainDescriptor) -> bool {
        if OverrideGate::for_family(self.name()).locate(ctx).is_some() {
            return true;
        }
        match self.discover(ctx, toolchain) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("`{}` is not available: {}", self.name(), err);
                false
            }
        }
    }

    /// Like `resolve`, but an absent library yields the fallback spec.
    ///
    /// Fatal errors are still returned.
    fn resolve_best_effort(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<LinkSpec, ResolveError> {
        match self.resolve(ctx, toolchain) {
            Err(err) if !err.is_fatal() => match self.fallback(toolchain) {
                Some(spec) => {
                    tracing::warn!(
                        "{}; linking `{}` unverified",
                        err,
                        spec.link_tokens.join(" ")
                    );
                    Ok(spec)
                }
                None => Err(err),
            },
            other => other,
        }
    }
}

/// Library families known to anchorage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Boost,
    OpenSsl,
    Pcre,
    Pcre2,
    Zlib,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Boost,
        Family::OpenSsl,
        Family::Pcre,
        Family::Pcre2,
        Family::Zlib,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Boost => "boost",
            Family::OpenSsl => "openssl",
            Family::Pcre => "pcre",
            Family::Pcre2 => "pcre2",
            Family::Zlib => "zlib",
        }
    }

    /// Build the resolver for this family.
    pub fn resolver(&self, ctx: &ResolverContext) -> Box<dyn LibraryResolver> {
        match self {
            Family::Boost => Box::new(
                BoostResolver::new(ctx.settings().boost_components.clone())
                    .with_variant(asio::link_variant(ctx.env())),
            ),
            Family::OpenSsl => Box::new(OpenSslResolver),
            Family::Pcre => Box::new(SimpleLibrary::pcre()),
            Family::Pcre2 => Box::new(SimpleLibrary::pcre2()),
            Family::Zlib => Box::new(SimpleLibrary::zlib()),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Family::ALL
            .into_iter()
            .find(|family| family.as_str() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = Family::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown library '{}'; expected one of: {}", s, known.join(", "))
            })
    }
}
