//! OpenSSL: a library whose file names changed at 1.1.0.
//!
//! MSVC builds before 1.1.0 ship `libeay32.lib`/`ssleay32.lib`; later ones
//! ship `libssl.lib`/`libcrypto.lib`. Both may be installed at once. The
//! generation found first in `LIB` wins, whichever is newer, since that is
//! the one the linker would pick up.

use std::path::PathBuf;

use crate::core::link_spec::LinkSpec;
use crate::core::toolchain::ToolchainDescriptor;
use crate::probe::flavor::ToolchainFlavor;
use crate::resolver::errors::ResolveError;
use crate::resolver::LibraryResolver;
use crate::util::context::ResolverContext;
use crate::util::fs::{find_first_set, join_names};

const LEGACY_FILES: [&str; 2] = ["libeay32.lib", "ssleay32.lib"];
const CURRENT_FILES: [&str; 2] = ["libssl.lib", "libcrypto.lib"];

/// An on-disk naming generation of OpenSSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Before 1.1.0 (`libeay32`, `ssleay32`)
    Legacy,
    /// 1.1.0 and later (`libssl`, `libcrypto`)
    Current,
}

impl Generation {
    /// Link tokens in link order.
    pub fn tokens(&self) -> [&'static str; 2] {
        match self {
            Generation::Legacy => ["libeay32", "ssleay32"],
            Generation::Current => ["libssl", "libcrypto"],
        }
    }
}

/// Pick the generation whose complete file set appears first in `dirs`.
///
/// Both sets are tried in each directory before the next one, so a
/// directory holding both yields `current`.
pub fn select_generation<S: AsRef<str>>(
    dirs: &[PathBuf],
    legacy: &[S],
    current: &[S],
) -> Option<(Generation, PathBuf)> {
    let as_set = |names: &[S]| -> Vec<String> {
        names.iter().map(|n| n.as_ref().to_string()).collect()
    };
    let candidates: Vec<Vec<String>> = vec![as_set(current), as_set(legacy)];

    find_first_set(dirs, &candidates).map(|found| {
        let generation = match found.set_index {
            0 => Generation::Current,
            _ => Generation::Legacy,
        };
        (generation, dirs[found.dir_index].clone())
    })
}

/// Resolver for the OpenSSL `ssl` and `crypto` libraries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSslResolver;

impl OpenSslResolver {
    fn gcc_tokens(flavor: ToolchainFlavor) -> Vec<&'static str> {
        let mut tokens = vec!["ssl", "crypto"];
        if flavor == ToolchainFlavor::MinGw {
            tokens.push("gdi32");
        }
        tokens
    }
}

impl LibraryResolver for OpenSslResolver {
    fn name(&self) -> &str {
        "openssl"
    }

    fn discover(
        &self,
        ctx: &ResolverContext,
        toolchain: &ToolchainDescriptor,
    ) -> Result<LinkSpec, ResolveError> {
        let dirs = ctx.library_search_dirs(toolchain)?;
        let flavor = ToolchainFlavor::of(toolchain);

        if flavor == ToolchainFlavor::Msvc {
            return match select_generation(&dirs, &LEGACY_FILES, &CURRENT_FILES) {
                Some((generation, dir)) => {
                    tracing::debug!("openssl {:?} generation in {}", generation, dir.display());
                    Ok(LinkSpec::new("openssl").tokens(generation.tokens()))
                }
                None => Err(ResolveError::NotFound {
                    library: "openssl".to_string(),
                    tried: vec![join_names(&LEGACY_FILES), join_names(&CURRENT_FILES)],
                    searched: dirs,
                }),
            };
        }

        let candidates = flavor.library_files(toolchain, &["ssl", "crypto"]);
        match find_first_set(&dirs, &candidates) {
            Some(_) => Ok(LinkSpec::new("openssl").tokens(Self::gcc_tokens(flavor))),
            None => Err(ResolveError::NotFound {
                library: "openssl".to_string(),
                tried: candidates.iter().map(|set| join_names(set)).collect(),
                searched: dirs,
            }),
        }
    }

    fn fallback(&self, toolchain: &ToolchainDescriptor) -> Option<LinkSpec> {
        match ToolchainFlavor::of(toolchain) {
            ToolchainFlavor::Msvc => None,
            flavor => Some(LinkSpec::new("openssl").tokens(Self::gcc_tokens(flavor))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::toolchain::RuntimeLinkage;
    use crate::test_support::{gcc_posix, mingw, msvc, search_dirs_output, LibraryTree, MockRunner};
    use crate::util::env::Environment;

    fn msvc_context(tree: &LibraryTree) -> ResolverContext {
        let env = Environment::default().with("LIB", tree.env_list());
        ResolverContext::new(env, tree.root()).with_runner(MockRunner::new())
    }

    #[test]
    fn test_earlier_directory_wins() {
        // Legacy first, current second: legacy wins despite being older.
        let tree = LibraryTree::new(3)
            .with_files(1, &LEGACY_FILES)
            .with_files(2, &CURRENT_FILES);
        let (generation, dir) =
            select_generation(tree.dirs(), &LEGACY_FILES, &CURRENT_FILES).unwrap();
        assert_eq!(generation, Generation::Legacy);
        assert_eq!(dir, tree.dir(1));

        let tree = LibraryTree::new(2)
            .with_files(0, &CURRENT_FILES)
            .with_files(1, &LEGACY_FILES);
        let (generation, _) =
            select_generation(tree.dirs(), &LEGACY_FILES, &CURRENT_FILES).unwrap();
        assert_eq!(generation, Generation::Current);
    }

    #[test]
    fn test_same_directory_prefers_current() {
        let tree = LibraryTree::new(1)
            .with_files(0, &LEGACY_FILES)
            .with_files(0, &CURRENT_FILES);
        let (generation, _) =
            select_generation(tree.dirs(), &LEGACY_FILES, &CURRENT_FILES).unwrap();
        assert_eq!(generation, Generation::Current);
    }

    #[test]
    fn test_incomplete_sets_are_ignored() {
        let tree = LibraryTree::new(2)
            .with_files(0, &["libeay32.lib", "libssl.lib"])
            .with_files(1, &["ssleay32.lib"]);
        assert_eq!(select_generation(tree.dirs(), &LEGACY_FILES, &CURRENT_FILES), None);
    }

    // Whatever the layout, the chosen generation is the one whose set
    // completes at the lowest directory index.
    #[test]
    fn test_order_is_the_only_tie_break() {
        for legacy_at in 0..4 {
            for current_at in 0..4 {
                let tree = LibraryTree::new(4)
                    .with_files(legacy_at, &LEGACY_FILES)
                    .with_files(current_at, &CURRENT_FILES);
                let (generation, dir) =
                    select_generation(tree.dirs(), &LEGACY_FILES, &CURRENT_FILES).unwrap();
                let expected = if legacy_at < current_at {
                    Generation::Legacy
                } else {
                    Generation::Current
                };
                assert_eq!(generation, expected, "legacy={} current={}", legacy_at, current_at);
                assert_eq!(dir, tree.dir(legacy_at.min(current_at)));
            }
        }
    }

    #[test]
    fn test_msvc_resolve() {
        let tree = LibraryTree::new(2).with_files(1, &LEGACY_FILES);
        let ctx = msvc_context(&tree);
        let spec = OpenSslResolver.resolve(&ctx, &msvc("14")).unwrap();
        assert_eq!(spec.link_tokens, vec!["libeay32", "ssleay32"]);
    }

    #[test]
    fn test_msvc_not_found_lists_both_generations() {
        let tree = LibraryTree::new(2);
        let ctx = msvc_context(&tree);

        match OpenSslResolver.resolve(&ctx, &msvc("14")).unwrap_err() {
            ResolveError::NotFound { tried, searched, .. } => {
                assert_eq!(
                    tried,
                    vec!["libeay32.lib, ssleay32.lib", "libssl.lib, libcrypto.lib"]
                );
                assert_eq!(searched, tree.dirs().to_vec());
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(OpenSslResolver.resolve_best_effort(&ctx, &msvc("14")).is_err());
    }

    #[test]
    fn test_mingw_tokens() {
        let tree = LibraryTree::new(1).with_files(0, &["libssl.a", "libcrypto.a"]);
        let runner = MockRunner::new();
        runner.expect_contains("-print-search-dirs", search_dirs_output(tree.dirs(), ';'));
        let ctx = ResolverContext::new(Environment::default(), tree.root())
            .with_runner(runner.clone());

        let spec = OpenSslResolver
            .resolve(&ctx, &mingw(RuntimeLinkage::Static))
            .unwrap();
        assert_eq!(spec.link_tokens, vec!["ssl", "crypto", "gdi32"]);
    }

    #[test]
    fn test_posix_requires_both_libraries() {
        let tree = LibraryTree::new(1).with_files(0, &["libssl.so"]);
        let runner = MockRunner::new();
        runner.expect_contains("-print-search-dirs", search_dirs_output(tree.dirs(), ':'));
        let ctx = ResolverContext::new(Environment::default(), tree.root())
            .with_runner(runner.clone());

        assert!(!OpenSslResolver.is_available(&ctx, &gcc_posix()));
        let spec = OpenSslResolver
            .resolve_best_effort(&ctx, &gcc_posix())
            .unwrap();
        assert_eq!(spec.link_tokens, vec!["ssl", "crypto"]);
    }
}
