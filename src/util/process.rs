//! Subprocess execution utilities.
//!
//! Compiler introspection goes through the narrow [`DiagnosticRunner`]
//! interface so that resolvers can be exercised against canned compiler
//! output instead of a real toolchain.

use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

use crate::util::env::Environment;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    stdin_file: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            stdin_file: None,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Feed the given file to the child's stdin.
    pub fn stdin_file(mut self, path: impl AsRef<Path>) -> Self {
        self.stdin_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the Command.
    fn build_command(&self) -> Result<Command> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        match self.stdin_file {
            Some(ref path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open stdin file: {}", path.display()))?;
                cmd.stdin(Stdio::from(file));
            }
            None => {
                cmd.stdin(Stdio::null());
            }
        }

        Ok(cmd)
    }

    /// Execute the command and wait for completion.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command()?;
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok(output)
    }

    /// Execute and return stdout followed by stderr, like `2>&1`.
    ///
    /// The exit status is not checked: compilers print diagnostic listings
    /// even when they fail on the (empty) input.
    pub fn exec_combined(&self) -> Result<String> {
        let output = self.exec()?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        if let Some(ref path) = self.stdin_file {
            parts.push(format!("< {}", path.display()));
        }
        parts.join(" ")
    }
}

/// A compiler diagnostic invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRequest {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub stdin: Option<PathBuf>,
}

impl DiagnosticRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        DiagnosticRequest {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    /// Render as a shell-like command line.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Capability to run the compiler with diagnostic flags.
///
/// Returns the combined stdout/stderr text of the invocation.
pub trait DiagnosticRunner {
    fn run(&self, request: &DiagnosticRequest) -> Result<String>;
}

/// Runs real subprocesses.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl DiagnosticRunner for SystemRunner {
    fn run(&self, request: &DiagnosticRequest) -> Result<String> {
        let mut builder = ProcessBuilder::new(&request.program).args(&request.args);
        if let Some(ref stdin) = request.stdin {
            builder = builder.stdin_file(stdin);
        }
        tracing::debug!("running `{}`", builder.display_command());
        builder.exec_combined()
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find a C++ compiler driver.
///
/// Checks `CXX` first, then common driver names.
pub fn find_cxx_compiler(env: &Environment) -> Option<PathBuf> {
    if let Some(cxx) = env.get("CXX") {
        if let Some(path) = find_executable(cxx) {
            return Some(path);
        }
    }

    for compiler in &["c++", "g++", "clang++", "cl"] {
        if let Some(path) = find_executable(compiler) {
            return Some(path);
        }
    }

    None
}
