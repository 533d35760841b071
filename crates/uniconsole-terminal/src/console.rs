//! Console session: wires the dispatcher to a display sink.
//!
//! The session owns the catalog, the registry built from it, the input
//! history and the sink that renders output. Hosts feed it submitted lines,
//! key presses for history and completion, and periodically drain the log
//! mirror into the same sink.

use uniconsole_types::config::ConsoleConfig;
use uniconsole_types::error::Result;
use uniconsole_types::severity::Severity;

use crate::autocomplete::{CompletionAction, complete};
use crate::builtins::command_listing;
use crate::catalog::CommandCatalog;
use crate::dispatcher::{Dispatcher, Outcome};
use crate::history::History;
use crate::log_mirror::MirrorHandle;
use crate::registry::CommandRegistry;

/// Where console output goes.
pub trait OutputSink {
    /// Append one block of text with its severity.
    fn write(&mut self, text: &str, severity: Severity);

    /// Remove everything shown so far.
    fn clear(&mut self);
}

/// In-memory sink that keeps every written block.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<(String, Severity)>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(String, Severity)] {
        &self.lines
    }

    /// All text joined by newlines.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.lines.iter().map(|(t, _)| t.as_str()).collect();
        parts.join("\n")
    }
}

impl OutputSink for BufferSink {
    fn write(&mut self, text: &str, severity: Severity) {
        self.lines.push((text.to_string(), severity));
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// An interactive console session.
pub struct Console<S: OutputSink> {
    config: ConsoleConfig,
    catalog: CommandCatalog,
    registry: CommandRegistry,
    history: History,
    sink: S,
    mirror: Option<MirrorHandle>,
    enabled: bool,
}

impl<S: OutputSink> Console<S> {
    /// Validate `config` and build the registry from `catalog`.
    pub fn new(config: ConsoleConfig, catalog: CommandCatalog, sink: S) -> Result<Self> {
        config.validate()?;
        let registry = CommandRegistry::new(config.name_policy);
        registry.rebuild(&catalog, config.allow_private_commands)?;
        let history = History::new(config.history_limit);
        Ok(Self {
            config,
            catalog,
            registry,
            history,
            sink,
            mirror: None,
            enabled: false,
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Candidate commands; call [`Console::rebuild`] after changing them.
    pub fn catalog_mut(&mut self) -> &mut CommandCatalog {
        &mut self.catalog
    }

    /// Rebuild the registry from the catalog.
    pub fn rebuild(&mut self) -> Result<()> {
        self.registry
            .rebuild(&self.catalog, self.config.allow_private_commands)
    }

    /// Connect a log mirror; its enabled flag follows this console.
    pub fn attach_mirror(&mut self, handle: MirrorHandle) {
        handle.set_console_enabled(self.enabled);
        self.mirror = Some(handle);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show the console, applying the clear/help-on-enable options.
    pub fn enable(&mut self) -> Result<()> {
        self.enabled = true;
        if let Some(mirror) = &self.mirror {
            mirror.set_console_enabled(true);
        }
        if self.config.clear_on_enable {
            self.sink.clear();
        }
        if self.config.print_help_on_enable {
            self.print_help()?;
        }
        Ok(())
    }

    /// Hide the console.
    pub fn disable(&mut self) {
        self.enabled = false;
        if let Some(mirror) = &self.mirror {
            mirror.set_console_enabled(false);
        }
    }

    /// Echo, dispatch and render one submitted line.
    pub fn submit(&mut self, line: &str) -> Result<Outcome> {
        if !line.trim().is_empty() {
            self.history.push(line);
        }
        let echo = format!("{}{line}", self.config.prompt);
        self.sink.write(&echo, Severity::Message);

        let outcome = Dispatcher::new(&self.registry, &self.config).dispatch(line)?;
        match &outcome {
            Outcome::Cleared => {
                self.sink.clear();
                if self.config.print_help_on_clear {
                    self.print_help()?;
                }
            },
            other => self.sink.write(&other.render(), other.severity()),
        }
        Ok(outcome)
    }

    /// Previous history entry, for the up key.
    pub fn history_older(&mut self) -> Option<&str> {
        self.history.older()
    }

    /// Next history entry, for the down key.
    pub fn history_newer(&mut self) -> Option<&str> {
        self.history.newer()
    }

    /// Complete the command name being typed.
    ///
    /// Suggestions are also written to the sink so the user sees them.
    pub fn complete_input(&mut self, partial: &str) -> Result<CompletionAction> {
        let action = complete(&self.registry, partial)?.apply(partial);
        if let CompletionAction::Suggest(names) = &action {
            self.sink.write(&names.join("  "), Severity::Message);
        }
        Ok(action)
    }

    /// Forward queued log lines to the sink; returns how many were written.
    pub fn drain_log_mirror(&mut self) -> usize {
        let Some(mirror) = &self.mirror else {
            return 0;
        };
        let lines = mirror.drain();
        for line in &lines {
            self.sink.write(&line.text, line.severity);
        }
        lines.len()
    }

    fn print_help(&mut self) -> Result<()> {
        let snapshot = self.registry.snapshot()?;
        self.sink.write(&command_listing(&snapshot), Severity::Message);
        Ok(())
    }
}
