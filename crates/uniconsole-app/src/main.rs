//! UniConsole desktop entry point.
//!
//! Line-oriented host for the console: reads commands from stdin and prints
//! themed output to stdout. `?partial` completes a command name, `!!`
//! recalls the previous line, `:quit` (or end of input) exits. With
//! `UNICONSOLE_RICH_TEXT` set, output carries rich-text color tags instead of
//! ANSI escapes.

mod commands;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use log::LevelFilter;
use uniconsole_terminal::{
    CommandCatalog, CompletionAction, Console, LogMirror, OutputSink,
};
use uniconsole_types::config::{ConsoleConfig, ConsoleTheme};
use uniconsole_types::severity::Severity;

const RESET: &str = "\x1b[0m";

/// Writes console output to stdout using the theme colors.
struct TerminalSink {
    theme: ConsoleTheme,
    rich_text: bool,
}

impl OutputSink for TerminalSink {
    fn write(&mut self, text: &str, severity: Severity) {
        if self.rich_text {
            println!("{}", self.theme.markup(text, severity));
        } else {
            let color = self.theme.color_for(severity).ansi_fg();
            println!("{color}{text}{RESET}");
        }
    }

    fn clear(&mut self) {
        print!("\x1b[2J\x1b[H");
    }
}

fn load_config() -> Result<ConsoleConfig> {
    // Config path from CLI arg or UNICONSOLE_CONFIG env var.
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("UNICONSOLE_CONFIG").ok());
    match path {
        Some(path) => ConsoleConfig::load(&path).with_context(|| format!("loading {path}")),
        None => Ok(ConsoleConfig::default()),
    }
}

fn main() -> Result<()> {
    let config = load_config()?;

    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let max_level = logger.filter().max(LevelFilter::Warn);
    let (mirror, handle) = LogMirror::new(&config, Some(Box::new(logger)));
    mirror.install(max_level)?;

    let mut catalog = CommandCatalog::with_builtins();
    commands::register_sample_commands(&mut catalog);
    let sink = TerminalSink {
        theme: config.theme.clone(),
        rich_text: std::env::var_os("UNICONSOLE_RICH_TEXT").is_some(),
    };
    let prompt = config.theme.prompt_color().ansi_fg();
    let mut console = Console::new(config, catalog, sink)?;
    console.attach_mirror(handle);
    console.enable()?;
    log::info!(
        "UniConsole ready with {} commands",
        console.registry().snapshot()?.len()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        console.drain_log_mirror();
        print!("{prompt}{}{RESET}", console.config().prompt);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);

        if line == ":quit" {
            break;
        }
        if let Some(partial) = line.strip_prefix('?') {
            if let CompletionAction::Extend(prefix) = console.complete_input(partial)? {
                println!("{prefix}");
            }
            continue;
        }
        let line = if line == "!!" {
            match console.history_older() {
                Some(previous) => previous.to_string(),
                None => continue,
            }
        } else {
            line.to_string()
        };
        console.submit(&line)?;
    }

    console.disable();
    log::info!("UniConsole shut down cleanly");
    Ok(())
}
