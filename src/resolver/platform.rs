//! System libraries every target needs.

use crate::core::link_spec::LinkSpec;
use crate::core::toolchain::ToolchainDescriptor;

/// Socket libraries required on Windows; POSIX needs none.
pub fn platform_libs(toolchain: &ToolchainDescriptor) -> LinkSpec {
    let spec = LinkSpec::new("platform");
    if toolchain.is_windows() {
        spec.tokens(["wsock32", "ws2_32"])
    } else {
        spec
    }
}
