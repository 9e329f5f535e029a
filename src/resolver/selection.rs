//! Bundled vs system copies of a dependency.

use std::fmt;

use serde::Serialize;

use crate::core::link_spec::LinkSpec;

/// Which copy of a dependency the build should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    /// Build the copy vendored with the project
    Bundled { name: String },
    /// Link the installed library
    System(LinkSpec),
}

impl Selection {
    pub fn bundled(name: impl Into<String>) -> Self {
        Selection::Bundled { name: name.into() }
    }

    pub fn is_bundled(&self) -> bool {
        matches!(self, Selection::Bundled { .. })
    }

    /// The system link spec, if one was selected.
    pub fn link_spec(&self) -> Option<&LinkSpec> {
        match self {
            Selection::System(spec) => Some(spec),
            Selection::Bundled { .. } => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Bundled { name } => write!(f, "bundled {}", name),
            Selection::System(spec) => {
                write!(f, "system {} ({})", spec.logical_name, spec.link_tokens.join(" "))
            }
        }
    }
}
