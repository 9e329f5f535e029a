//! `anchorage probe` command

use anyhow::Result;

use super::Session;
use anchorage::resolver::asio::select_asio;
use anchorage::resolver::platform::platform_libs;
use anchorage::resolver::simple::select_zlib;
use anchorage::resolver::{Family, Selection};
use anchorage::ResolveError;

pub fn execute(session: &Session) -> Result<()> {
    let (ctx, tc) = (&session.ctx, &session.toolchain);

    println!("Libraries for {}:", tc);
    for family in Family::ALL {
        let available = family.resolver(ctx).is_available(ctx, tc);
        println!("  {:<8} {}", family.as_str(), if available { "yes" } else { "no" });
    }

    println!();
    println!("Selections:");
    println!("  {:<8} {}", "asio", describe(select_asio(ctx, tc)));
    println!("  {:<8} {}", "zlib", describe(select_zlib(ctx, tc)));

    let platform = platform_libs(tc);
    if !platform.is_empty() {
        println!();
        println!("Platform libraries: {}", platform.link_tokens.join(" "));
    }

    Ok(())
}

fn describe(selection: Result<Selection, ResolveError>) -> String {
    match selection {
        Ok(selection) => selection.to_string(),
        Err(err) => format!("error: {}", err),
    }
}
