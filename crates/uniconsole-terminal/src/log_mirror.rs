//! Mirroring host log records into the console.
//!
//! [`LogMirror`] is a `log::Log` implementation that forwards every record
//! to an optional inner logger (typically `env_logger`) and queues the ones
//! the console wants to show. The console drains the queue through a
//! [`MirrorHandle`] and writes the lines to its sink.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{LevelFilter, Log, Metadata, Record};
use uniconsole_types::config::ConsoleConfig;
use uniconsole_types::error::{ConsoleError, Result};
use uniconsole_types::severity::Severity;

/// Maximum number of queued lines; older lines are dropped first.
const MAX_QUEUED: usize = 1000;

/// Records from this crate are never mirrored, so dispatch diagnostics
/// cannot echo back into the console.
const OWN_TARGET: &str = "uniconsole_terminal";

/// One mirrored log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy)]
struct MirrorFilter {
    messages: bool,
    warnings: bool,
    errors: bool,
    location_on_message: bool,
    location_on_errors: bool,
    when_disabled: bool,
}

impl MirrorFilter {
    fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            messages: config.intercepts(Severity::Message),
            warnings: config.intercepts(Severity::Warning),
            errors: config.intercepts(Severity::Error),
            location_on_message: config.includes_location(Severity::Message),
            location_on_errors: config.includes_location(Severity::Error),
            when_disabled: config.intercept_when_disabled,
        }
    }

    fn accepts(&self, severity: Severity) -> bool {
        match severity {
            Severity::Message => self.messages,
            Severity::Warning => self.warnings,
            Severity::Error => self.errors,
        }
    }

    fn with_location(&self, severity: Severity) -> bool {
        match severity {
            Severity::Message => self.location_on_message,
            Severity::Warning | Severity::Error => self.location_on_errors,
        }
    }
}

/// Shared state between the installed logger and the console.
#[derive(Debug, Clone)]
pub struct MirrorHandle {
    queue: Arc<Mutex<VecDeque<LogLine>>>,
    console_enabled: Arc<AtomicBool>,
}

impl MirrorHandle {
    /// Take every queued line, oldest first.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    /// Tell the mirror whether the console is currently shown.
    pub fn set_console_enabled(&self, enabled: bool) {
        self.console_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_console_enabled(&self) -> bool {
        self.console_enabled.load(Ordering::Relaxed)
    }

    fn push(&self, line: LogLine) {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        if queue.len() >= MAX_QUEUED {
            queue.pop_front();
        }
        queue.push_back(line);
    }
}

/// `log::Log` wrapper that copies selected records into the console.
pub struct LogMirror {
    inner: Option<Box<dyn Log>>,
    filter: MirrorFilter,
    handle: MirrorHandle,
}

impl LogMirror {
    /// Build a mirror configured from `config`, wrapping `inner`.
    pub fn new(config: &ConsoleConfig, inner: Option<Box<dyn Log>>) -> (Self, MirrorHandle) {
        let handle = MirrorHandle {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            console_enabled: Arc::new(AtomicBool::new(false)),
        };
        let mirror = Self {
            inner,
            filter: MirrorFilter::from_config(config),
            handle: handle.clone(),
        };
        (mirror, handle)
    }

    /// Install as the global logger.
    pub fn install(self, max_level: LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| ConsoleError::Config(format!("cannot install log mirror: {e}")))?;
        log::set_max_level(max_level);
        Ok(())
    }

    fn mirrors(&self, record: &Record<'_>) -> Option<Severity> {
        if record.target().starts_with(OWN_TARGET) {
            return None;
        }
        let severity = Severity::from_level(record.level());
        if !self.filter.accepts(severity) {
            return None;
        }
        if !self.handle.is_console_enabled() && !self.filter.when_disabled {
            return None;
        }
        Some(severity)
    }
}

impl Log for LogMirror {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let inner = self.inner.as_ref().is_some_and(|l| l.enabled(metadata));
        inner || self.filter.accepts(Severity::from_level(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if let Some(inner) = &self.inner
            && inner.enabled(record.metadata())
        {
            inner.log(record);
        }

        let Some(severity) = self.mirrors(record) else {
            return;
        };
        let mut text = record.args().to_string();
        if self.filter.with_location(severity) {
            match (record.file(), record.line()) {
                (Some(file), Some(line)) => text.push_str(&format!("\n  at {file}:{line}")),
                _ => text.push_str(&format!("\n  at {}", record.target())),
            }
        }
        self.handle.push(LogLine { text, severity });
    }

    fn flush(&self) {
        if let Some(inner) = &self.inner {
            inner.flush();
        }
    }
}
