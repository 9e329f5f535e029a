//! Core data structures for anchorage.
//!
//! - Toolchain descriptors (compiler family, target, runtime flags)
//! - Encoded library versions
//! - Link specifications, the output of every resolver

pub mod link_spec;
pub mod toolchain;
pub mod version;

pub use link_spec::{Define, LinkPreference, LinkSpec};
pub use toolchain::ToolchainDescriptor;
pub use version::VersionTriple;
