//! Toolchain probing: search-path introspection, version headers, and
//! library name decoration.

pub mod detect;
pub mod flavor;
pub mod introspect;
pub mod mangle;
pub mod version_header;

pub use detect::detect_toolchain;
pub use flavor::ToolchainFlavor;
pub use mangle::{LibraryNameMangler, LinkVariant};
pub use version_header::VersionHeaderReader;
