//! `anchorage toolchain` command

use anyhow::Result;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let tc = &session.toolchain;

    println!("Toolchain: {}", tc);
    println!();
    println!("  Compiler: {}", tc.compiler_path().display());
    println!("  Family:   {}", tc.family);
    if !tc.version_tag.is_empty() {
        println!("  Version:  {}", tc.version_tag);
    }
    println!("  Target:   {}", tc.target_os);
    println!("  Bits:     {}", tc.bits);
    println!("  Runtime:  {} {}", tc.linkage, tc.mode);

    Ok(())
}
