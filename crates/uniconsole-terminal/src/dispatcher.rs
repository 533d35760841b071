//! Resolving and executing one invocation line.
//!
//! A line goes through `tokenize -> resolve -> parse -> invoke -> format`.
//! Every recoverable problem (unknown name, ambiguous name, bad arguments,
//! failing command body, unprintable result) becomes an [`Outcome`]; only a
//! registry that was never built is reported as an `Err`.

use uniconsole_types::config::ConsoleConfig;
use uniconsole_types::error::{ConsoleError, Result};
use uniconsole_types::severity::Severity;

use crate::descriptor::{CommandContext, CommandDescriptor};
use crate::formatter::format_value;
use crate::parser::parse_args;
use crate::registry::CommandRegistry;

/// Reserved keyword handled before any registry lookup.
pub const CLEAR_KEYWORD: &str = "clear";

/// Result of dispatching one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The command ran; carries its formatted result.
    Executed(String),
    /// The `clear` keyword was entered.
    Cleared,
    /// The bare name matches several commands; carries one label per candidate.
    Ambiguous(Vec<String>),
    /// Nothing matched; carries the raw line verbatim.
    NoMatch(String),
    /// Arguments could not be coerced; the command was not run.
    ArgumentError(String),
    /// The command body returned an error.
    InvocationFailed(String),
    /// The command returned a value that cannot be displayed.
    FormatFailed(String),
}

impl Outcome {
    /// How the host should style this outcome.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Executed(_) | Self::Cleared | Self::NoMatch(_) => Severity::Message,
            Self::Ambiguous(_) => Severity::Warning,
            Self::ArgumentError(_) | Self::InvocationFailed(_) | Self::FormatFailed(_) => {
                Severity::Error
            },
        }
    }

    /// Display text for this outcome.
    pub fn render(&self) -> String {
        match self {
            Self::Executed(text) => text.clone(),
            Self::Cleared => String::new(),
            Self::Ambiguous(candidates) => {
                let mut out = String::from(
                    "Ambiguous command, use a qualified name. Candidates:",
                );
                for c in candidates {
                    out.push_str("\n  ");
                    out.push_str(c);
                }
                out
            },
            Self::NoMatch(raw) => raw.clone(),
            Self::ArgumentError(reason) => format!("Invalid arguments: {reason}"),
            Self::InvocationFailed(reason) => format!("Command failed: {reason}"),
            Self::FormatFailed(reason) => format!("Cannot display result: {reason}"),
        }
    }
}

/// Label used when listing an ambiguous candidate.
pub fn candidate_label(desc: &CommandDescriptor) -> String {
    format!("{}  [{}]", desc.signature(), desc.full_name())
}

/// Resolves lines against a registry and runs the matching command.
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    config: &'a ConsoleConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a CommandRegistry, config: &'a ConsoleConfig) -> Self {
        Self { registry, config }
    }

    /// Dispatch one raw line.
    ///
    /// Fails only with `NotInitialized` when the registry was never built.
    pub fn dispatch(&self, line: &str) -> Result<Outcome> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(Outcome::NoMatch(line.to_string()));
        };
        if name.eq_ignore_ascii_case(CLEAR_KEYWORD) {
            return Ok(Outcome::Cleared);
        }
        let args: Vec<&str> = tokens.collect();

        let snapshot = self.registry.snapshot()?;
        let aliased = if name.contains('.') {
            snapshot.lookup_qualified(name)
        } else {
            Vec::new()
        };
        let qualified = !aliased.is_empty();
        let candidates = if qualified {
            aliased
        } else {
            snapshot.lookup(name)
        };
        if candidates.is_empty() {
            log::debug!("no command named '{name}'");
            return Ok(Outcome::NoMatch(line.to_string()));
        }

        let matching: Vec<_> = candidates
            .iter()
            .filter(|d| d.arity() == args.len())
            .collect();
        if !qualified && candidates.len() > 1 && matching.len() != 1 {
            log::debug!(
                "'{name}' is ambiguous: {} candidates, {} with arity {}",
                candidates.len(),
                matching.len(),
                args.len()
            );
            return Ok(Outcome::Ambiguous(
                candidates.iter().map(|d| candidate_label(d)).collect(),
            ));
        }
        let Some(desc) = matching.first() else {
            log::debug!("no overload of '{name}' takes {} argument(s)", args.len());
            return Ok(Outcome::NoMatch(line.to_string()));
        };

        let values = if desc.arity() == 0 {
            Vec::new()
        } else {
            match parse_args(&args, desc.params(), self.config.collection_separator_input) {
                Ok(values) => values,
                Err(ConsoleError::Argument(reason)) => return Ok(Outcome::ArgumentError(reason)),
                Err(other) => return Ok(Outcome::ArgumentError(other.to_string())),
            }
        };

        log::debug!("invoking {}", desc.full_name());
        let ctx = CommandContext {
            args: &values,
            snapshot: snapshot.as_ref(),
            config: self.config,
        };
        let value = match desc.invoke(&ctx) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("command {} failed: {e}", desc.full_name());
                return Ok(Outcome::InvocationFailed(e.to_string()));
            },
        };

        match format_value(
            &value,
            &self.config.void_command_feedback,
            &self.config.collection_separator_output,
        ) {
            Ok(text) => Ok(Outcome::Executed(text)),
            Err(e) => Ok(Outcome::FormatFailed(e.to_string())),
        }
    }
}
