//! Libraries with one plain name per platform: PCRE, PCRE2 and zlib.

use crate::core::link_spec::{Define, LinkPreference, LinkSpec};
use crate::core::toolchain::ToolchainDescriptor;
use crate::probe::flavor::ToolchainFlavor;
use crate::resolver::errors::ResolveError;
use crate::resolver::selection::Selection;
use crate::resolver::LibraryResolver;
use crate::util::context::ResolverContext;
use crate::util::fs::{find_first_set, join_names};

/// Setting this variable always selects the bundled zlib.
pub const OWN_ZLIB_SWITCH: &str = "ANCHORAGE_USE_OWN_ZLIB";

/// A binary library found by file name in the linker search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleLibrary {
    name: String,
    stem: String,
    defines: Vec<Define>,
    linkage: LinkPreference,
}

impl SimpleLibrary {
    /// `name` is the family name, `stem` the undecorated file name (`pcre2-8`).
    pub fn new(name: impl Into<String>, stem: impl Into<String>) -> Self {
        SimpleLibrary {
            name: name.into(),
            stem: stem.into(),
            defines: Vec::new(),
            linkage: LinkPreference::Default,
        }
    }

    pub fn define(mut self, define: Define) -> Self {
        self.defines.push(define);
        self
    }

    pub fn with_linkage(mut self, linkage: LinkPreference) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn pcre() -> Self {
        SimpleLibrary::new("pcre", "pcre")
            .define(Define::flag("PCRE_STATIC"))
            .with_linkage(LinkPreference::Static)
    }

    pub fn pcre2() -> Self {
        SimpleLibrary::new("pcre2", "pcre2-8")
            .define(Define::flag("PCRE2_STATIC"))
            .define(Define::key_value("PCRE2_CODE_UNIT_WIDTH", "8"))
            .with_linkage(LinkPreference::Static)
    }

    pub fn zlib() -> Self {
        SimpleLibrary::new("zlib", "z")
    }

    fn candidates(&self, toolchain: &ToolchainDescriptor) -> Vec<Vec<String>> {
        let flavor = ToolchainFlavor::of(toolchain);
        if self.linkage == LinkPreference::Static && flavor != ToolchainFlavor::Msvc {
            return vec![vec![format!("lib{}.a", self.stem)]];
        }
        flavor.library_files(toolchain, &[self.stem.as_str()])
    }

    fn spec(&self) -> LinkSpec {
        let mut spec = LinkSpec::new(&self.name)
            .token(&self.stem)
            .with_linkage(self.linkage);
        for define in &self.defines {
            spec = spec.define(define.clone());
        }
        spec
    }
}

impl LibraryResolver for SimpleLibrary {
    fn name(&self) -> &str {
        &self.name
    }

    fn discover(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<LinkSpec, ResolveError> {
        let dirs = ctx.library_search_dirs(toolchain)?;
        let candidates = self.candidates(toolchain);

        match find_first_set(&dirs, &candidates) {
            Some(_) => Ok(self.spec()),
            None => Err(ResolveError::NotFound {
                library: self.name.clone(),
                tried: candidates.iter().map(|set| join_names(set)).collect(),
                searched: dirs,
            }),
        }
    }

    fn fallback(&self, _toolchain: &ToolchainDescriptor) -> Option<LinkSpec> {
        Some(self.spec())
    }
}

/// Pick the zlib to build against.
///
/// The bundled copy is used when requested through the environment or when
/// no system zlib is found. Broken toolchains are still reported.
pub fn select_zlib(
    ctx: &ResolverContext,
    toolchain: &ToolchainDescriptor,
) -> Result<Selection, ResolveError> {
    if ctx.env().contains(OWN_ZLIB_SWITCH) {
        tracing::debug!("{} is set, using bundled zlib", OWN_ZLIB_SWITCH);
        return Ok(Selection::bundled("zlib"));
    }

    match SimpleLibrary::zlib().resolve(ctx, toolchain) {
        Ok(spec) => Ok(Selection::System(spec)),
        Err(err) if !err.is_fatal() => {
            tracing::info!("{}; using bundled zlib", err);
            Ok(Selection::bundled("zlib"))
        }
        Err(err) => Err(err),
    }
}
