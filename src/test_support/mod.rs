//! Test utilities and mocks for anchorage unit tests.
//!
//! [`MockRunner`] stands in for the compiler: tests register the output a
//! command should produce, hand a clone of the runner to a
//! `ResolverContext`, and inspect the recorded calls afterwards.
//!
//! # Example
//!
//! ```rust,ignore
//! let runner = MockRunner::new();
//! runner.expect_contains("-print-search-dirs", search_dirs_output(&["/usr/lib"], ':'));
//!
//! let ctx = ResolverContext::new(Environment::default(), "/work").with_runner(runner.clone());
//! // resolve something...
//! assert_eq!(runner.call_count(), 1);
//! ```

pub mod fixtures;

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::util::process::{DiagnosticRequest, DiagnosticRunner};

pub use fixtures::*;

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// What a matched command produces.
#[derive(Debug, Clone)]
pub enum MockOutput {
    /// Combined stdout/stderr text
    Text(String),
    /// The compiler could not be started
    SpawnError(String),
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub output: MockOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    pub used: usize,
}

impl CommandExpectation {
    pub fn new(pattern: CommandPattern, output: MockOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
}

/// In-memory compiler for introspection tests.
///
/// Clones share state, so a test can keep one handle while the resolver
/// context owns another.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    state: Arc<Mutex<MockState>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: impl Into<String>) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            MockOutput::Text(output.into()),
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: impl Into<String>) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            MockOutput::Text(output.into()),
        ))
    }

    /// Make commands containing `substring` fail to start.
    pub fn fail_contains(&self, substring: &str, message: &str) -> &Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            MockOutput::SpawnError(message.to_string()),
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&self, expectation: CommandExpectation) -> &Self {
        self.state.lock().unwrap().expectations.push(expectation);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        let state = self.state.lock().unwrap();
        for (i, exp) in state.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl DiagnosticRunner for MockRunner {
    fn run(&self, request: &DiagnosticRequest) -> Result<String> {
        let full_cmd = request.display_command();
        let mut state = self.state.lock().unwrap();
        state.calls.push(full_cmd.clone());

        for exp in &mut state.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                return match exp.output {
                    MockOutput::Text(ref text) => Ok(text.clone()),
                    MockOutput::SpawnError(ref message) => {
                        bail!("failed to spawn `{}`: {}", request.program.display(), message)
                    }
                };
            }
        }

        bail!("unexpected command: {}", full_cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_matches_in_order() {
        let runner = MockRunner::new();
        runner
            .expect("g++ -v", "gcc version 7.1.0")
            .expect_pattern(
                CommandExpectation::new(
                    CommandPattern::StartsWith("g++".to_string()),
                    MockOutput::Text("first".to_string()),
                )
                .times(1),
            );

        let shared = runner.clone();
        let version = shared.run(&DiagnosticRequest::new("g++").args(["-v"])).unwrap();
        assert_eq!(version, "gcc version 7.1.0");

        let dirs = DiagnosticRequest::new("g++").args(["-print-search-dirs"]);
        assert_eq!(shared.run(&dirs).unwrap(), "first");
        assert!(shared.run(&dirs).is_err());

        assert_eq!(runner.call_count(), 3);
        assert!(runner.verify().is_ok());
    }

    #[test]
    fn test_spawn_error() {
        let runner = MockRunner::new();
        runner.fail_contains("cl", "not found");
        let err = runner.run(&DiagnosticRequest::new("cl")).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(runner.calls(), vec!["cl".to_string()]);
    }

    #[test]
    fn test_command_patterns() {
        assert!(CommandPattern::StartsWith("g++".into()).matches("g++ -v"));
        assert!(CommandPattern::Contains("-E -x".into()).matches("clang++ -E -x c++ - -v"));
        assert!(!CommandPattern::Exact("cl".into()).matches("cl /E"));
    }
}
