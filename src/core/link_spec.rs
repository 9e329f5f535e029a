//! Link specification - the output of every resolver.
//!
//! A `LinkSpec` is everything the caller's build system needs to link
//! against one native dependency: link tokens in order, extra library
//! search paths, include directories, and preprocessor defines.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A preprocessor define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Define {
    /// Simple flag: -DFOO
    Flag(String),
    /// Key-value: -DFOO=bar
    KeyValue { name: String, value: String },
}

impl Define {
    /// Create a simple flag define.
    pub fn flag(name: impl Into<String>) -> Self {
        Define::Flag(name.into())
    }

    /// Create a key-value define.
    pub fn key_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Define::KeyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the define name.
    pub fn name(&self) -> &str {
        match self {
            Define::Flag(n) => n,
            Define::KeyValue { name, .. } => name,
        }
    }

    /// Get the define value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Define::Flag(_) => None,
            Define::KeyValue { value, .. } => Some(value),
        }
    }

    /// Convert to compiler flag format.
    pub fn to_flag(&self) -> String {
        match self {
            Define::Flag(name) => format!("-D{}", name),
            Define::KeyValue { name, value } => format!("-D{}={}", name, value),
        }
    }
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Define::Flag(name) => f.write_str(name),
            Define::KeyValue { name, value } => write!(f, "{}={}", name, value),
        }
    }
}

/// How the caller should link the tokens of a spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPreference {
    /// Let the linker pick (plain `lib(...)`)
    #[default]
    Default,
    /// Force the static archive
    Static,
    /// Force the shared library
    Shared,
}

/// Resolved link specification for one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkSpec {
    /// Logical library name (e.g. "openssl")
    #[serde(default)]
    pub logical_name: String,

    /// Tokens passed to the linker, in link order
    #[serde(default)]
    pub link_tokens: Vec<String>,

    /// Extra library search paths
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Extra include directories
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// Preprocessor defines, unique by name
    #[serde(default)]
    pub defines: Vec<Define>,

    /// Linkage preference for the tokens
    #[serde(default)]
    pub linkage: LinkPreference,
}

impl LinkSpec {
    /// Create an empty spec for the given library.
    pub fn new(logical_name: impl Into<String>) -> Self {
        LinkSpec {
            logical_name: logical_name.into(),
            ..Default::default()
        }
    }

    /// Append a link token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.link_tokens.push(token.into());
        self
    }

    /// Append several link tokens, preserving order.
    pub fn tokens(mut self, tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.link_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Append a library search path.
    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Append an include directory.
    pub fn include_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(path.into());
        self
    }

    /// Set a define, replacing any earlier define with the same name.
    pub fn define(mut self, define: Define) -> Self {
        self.defines.retain(|d| d.name() != define.name());
        self.defines.push(define);
        self
    }

    /// Set the linkage preference.
    pub fn with_linkage(mut self, linkage: LinkPreference) -> Self {
        self.linkage = linkage;
        self
    }

    /// Look up a define by name.
    ///
    /// Returns `None` if the define is absent, `Some(None)` for a bare flag.
    pub fn define_value(&self, name: &str) -> Option<Option<&str>> {
        self.defines
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.value())
    }

    /// True if the spec asks the linker for nothing.
    pub fn is_empty(&self) -> bool {
        self.link_tokens.is_empty() && self.search_paths.is_empty()
    }
}
