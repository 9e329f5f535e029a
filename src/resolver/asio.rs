//! Asio: bundled standalone copy or Boost.Asio from the system.

use crate::core::toolchain::ToolchainDescriptor;
use crate::probe::mangle::LinkVariant;
use crate::resolver::boost::BoostResolver;
use crate::resolver::errors::ResolveError;
use crate::resolver::selection::Selection;
use crate::resolver::LibraryResolver;
use crate::util::context::ResolverContext;
use crate::util::env::Environment;

/// Set to link Boost.Asio; `static` or `shared` also picks the variant.
pub const ASIO_SWITCH: &str = "ANCHORAGE_BOOST_ASIO";

/// Link variant requested through [`ASIO_SWITCH`].
pub fn link_variant(env: &Environment) -> LinkVariant {
    env.get(ASIO_SWITCH)
        .map(LinkVariant::from_switch)
        .unwrap_or_default()
}

/// Decide how asio is provided.
///
/// Without the switch the bundled copy is used and nothing is probed. With
/// it, Boost.Asio needs `boost_system`, resolved strictly.
pub fn select_asio(
    ctx: &ResolverContext,
    toolchain: &ToolchainDescriptor,
) -> Result<Selection, ResolveError> {
    if !ctx.env().contains(ASIO_SWITCH) {
        return Ok(Selection::bundled("asio"));
    }

    let boost = BoostResolver::new(["boost_system"]).with_variant(link_variant(ctx.env()));
    let mut spec = boost.resolve(ctx, toolchain)?;
    spec.logical_name = "asio".to_string();
    Ok(Selection::System(spec))
}
