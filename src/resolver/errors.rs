//! Resolution error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::version::VersionTriple;
use crate::util::diagnostic::Diagnostic;

/// Error while locating a native library.
///
/// `NotFound` and `VersionTooLow` mean the library is absent or too old;
/// callers may skip the dependent feature. Every other variant indicates a
/// broken installation or toolchain and should stop the configuration pass.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("`{library}` not found")]
    #[diagnostic(code(anchorage::resolve::not_found))]
    NotFound {
        library: String,
        /// Candidate file or token sets that were tried
        tried: Vec<String>,
        /// Directories that were searched
        searched: Vec<PathBuf>,
    },

    #[error("`{library}` {found} is too old, at least {required} is required")]
    #[diagnostic(code(anchorage::resolve::version_too_low))]
    VersionTooLow {
        library: String,
        found: VersionTriple,
        required: VersionTriple,
        header: PathBuf,
    },

    #[error("unable to find {macro_name} definition in {}", path.display())]
    #[diagnostic(code(anchorage::resolve::version_not_found))]
    VersionNotFound { path: PathBuf, macro_name: String },

    #[error("unable to read {}: {reason}", path.display())]
    #[diagnostic(code(anchorage::resolve::file_unreadable))]
    FileUnreadable {
        path: PathBuf,
        reason: String,
        /// Directories that were searched for the file
        searched: Vec<PathBuf>,
    },

    #[error("toolset not supported: {toolchain}: {reason}")]
    #[diagnostic(code(anchorage::resolve::unsupported_toolchain))]
    UnsupportedToolchain { toolchain: String, reason: String },

    #[error("compiler introspection failed: `{command}`: {message}")]
    #[diagnostic(code(anchorage::resolve::introspection))]
    Introspection { command: String, message: String },

    #[error("invalid override file {}: {message}", path.display())]
    #[diagnostic(code(anchorage::resolve::invalid_override))]
    InvalidOverride { path: PathBuf, message: String },
}

impl ResolveError {
    /// True for errors that indicate breakage rather than absence.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ResolveError::NotFound { .. } | ResolveError::VersionTooLow { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::NotFound {
                library,
                tried,
                searched,
            } => {
                let mut diag = Diagnostic::error(format!("could not find `{}`", library));

                for candidate in tried {
                    diag = diag.with_context(format!("tried: {}", candidate));
                }
                if searched.is_empty() {
                    diag = diag.with_context("no search directories were available");
                }
                for dir in searched {
                    diag = diag.with_context(format!("searched: {}", dir.display()));
                }

                diag.with_suggestion(format!("Install the `{}` development package", library))
                    .with_suggestion(
                        "Point the build at a custom installation with an override file",
                    )
            }

            ResolveError::VersionTooLow {
                library,
                found,
                required,
                header,
            } => Diagnostic::error(format!("`{}` is too old", library))
                .with_location(header)
                .with_context(format!("found version {}", found))
                .with_context(format!("required version {} or newer", required))
                .with_suggestion(format!("Upgrade `{}` to {} or newer", library, required)),

            ResolveError::VersionNotFound { path, macro_name } => {
                Diagnostic::error(format!("no `{}` definition found", macro_name))
                    .with_location(path)
                    .with_suggestion("Check that the installation is complete and not corrupted")
            }

            ResolveError::FileUnreadable {
                path,
                reason,
                searched,
            } => {
                let mut diag = Diagnostic::error(format!("unable to read {}", path.display()))
                    .with_context(reason.clone());
                for dir in searched {
                    diag = diag.with_context(format!("searched: {}", dir.display()));
                }
                diag.with_suggestion("Set BOOST_ROOT to the root of the installation")
            }

            ResolveError::UnsupportedToolchain { toolchain, reason } => {
                Diagnostic::error(format!("toolset not supported: {}", toolchain))
                    .with_context(reason.clone())
                    .with_suggestion("Use a supported compiler or provide an override file")
            }

            ResolveError::Introspection { command, message } => {
                Diagnostic::error("compiler introspection failed")
                    .with_context(format!("command: {}", command))
                    .with_context(message.clone())
                    .with_suggestion("Check that the compiler is installed and on PATH")
            }

            ResolveError::InvalidOverride { path, message } => {
                Diagnostic::error("invalid override file")
                    .with_location(path)
                    .with_context(message.clone())
                    .with_suggestion("Fix the file or remove it to re-enable discovery")
            }
        }
    }
}
