//! Version macro extraction from header files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::resolver::errors::ResolveError;

/// Reads an integer version macro such as `BOOST_VERSION` out of a header.
#[derive(Debug, Clone)]
pub struct VersionHeaderReader {
    macro_name: String,
    pattern: Option<Regex>,
}

impl VersionHeaderReader {
    /// Match lines of the form `#define <macro_name> <digits>`.
    ///
    /// Nothing but whitespace may follow the value.
    pub fn new(macro_name: impl Into<String>) -> Self {
        VersionHeaderReader {
            macro_name: macro_name.into(),
            pattern: None,
        }
    }

    /// Use a custom line pattern; its first capture group is the value.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Return the value of the first matching line.
    pub fn read(&self, path: &Path) -> Result<u32, ResolveError> {
        let unreadable = |e: std::io::Error| ResolveError::FileUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
            searched: Vec::new(),
        };

        // Vendor headers are not always UTF-8; only the define line matters.
        let reader = BufReader::new(File::open(path).map_err(unreadable)?);
        for line in reader.split(b'\n') {
            let line = line.map_err(unreadable)?;
            if let Some(value) = self.match_line(&String::from_utf8_lossy(&line)) {
                tracing::debug!("{} = {} in {}", self.macro_name, value, path.display());
                return Ok(value);
            }
        }

        Err(ResolveError::VersionNotFound {
            path: path.to_path_buf(),
            macro_name: self.macro_name.clone(),
        })
    }

    fn match_line(&self, line: &str) -> Option<u32> {
        match self.pattern {
            Some(ref re) => re.captures(line)?.get(1)?.as_str().parse().ok(),
            None => parse_define(line, &self.macro_name),
        }
    }
}

fn parse_define(line: &str, macro_name: &str) -> Option<u32> {
    let rest = line.trim_start().strip_prefix('#')?.trim_start();
    let mut tokens = rest.strip_prefix("define")?.split_whitespace();

    if tokens.next()? != macro_name {
        return None;
    }
    let value = tokens.next()?;
    if tokens.next().is_some() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
