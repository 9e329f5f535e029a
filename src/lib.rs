//! Anchorage - native library discovery for C++ builds
//!
//! Given a description of the active compiler toolchain, anchorage locates
//! installed native libraries (Boost, OpenSSL, PCRE, PCRE2, zlib) and
//! produces the link tokens, search paths and defines a build needs.

pub mod core;
pub mod probe;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for anchorage unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides an in-memory compiler and on-disk library fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{LinkSpec, ToolchainDescriptor, VersionTriple};
pub use resolver::{Family, LibraryResolver, ResolveError};
pub use util::context::ResolverContext;
