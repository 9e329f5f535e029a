//! `anchorage search-dirs` command

use anyhow::Result;

use super::Session;
use crate::cli::SearchDirsArgs;
use anchorage::util::diagnostic::emit;

pub fn execute(args: SearchDirsArgs, session: &Session) -> Result<()> {
    let dirs = if args.headers {
        session.ctx.header_search_dirs(&session.toolchain)
    } else {
        session.ctx.library_search_dirs(&session.toolchain)
    };

    match dirs {
        Ok(dirs) => {
            for dir in dirs {
                println!("{}", dir.display());
            }
            Ok(())
        }
        Err(err) => {
            emit(&err.to_diagnostic(), session.color);
            std::process::exit(1);
        }
    }
}
