//! `anchorage resolve` command

use anyhow::{Context, Result};

use super::Session;
use crate::cli::ResolveArgs;
use anchorage::core::{LinkPreference, LinkSpec};
use anchorage::util::diagnostic::emit;

pub fn execute(args: ResolveArgs, session: &Session) -> Result<()> {
    let resolver = args.library.resolver(&session.ctx);
    let result = if args.best_effort {
        resolver.resolve_best_effort(&session.ctx, &session.toolchain)
    } else {
        resolver.resolve(&session.ctx, &session.toolchain)
    };

    let spec = match result {
        Ok(spec) => spec,
        Err(err) => {
            emit(&err.to_diagnostic(), session.color);
            std::process::exit(1);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&spec).context("failed to serialize link spec")?;
        println!("{}", json);
    } else {
        print_spec(&spec);
    }

    Ok(())
}

fn print_spec(spec: &LinkSpec) {
    println!("# Link specification for `{}`:", spec.logical_name);
    for token in &spec.link_tokens {
        println!("  lib: {}", token);
    }
    for path in &spec.search_paths {
        println!("  -L{}", path.display());
    }
    for dir in &spec.include_dirs {
        println!("  -I{}", dir.display());
    }
    for define in &spec.defines {
        println!("  {}", define.to_flag());
    }
    match spec.linkage {
        LinkPreference::Default => {}
        LinkPreference::Static => println!("  linkage: static"),
        LinkPreference::Shared => println!("  linkage: shared"),
    }
}
