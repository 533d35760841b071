//! Command registry and in-game console subsystem.
//!
//! The console is a registry-based dispatch system. Commands are described
//! by [`CommandDescriptor`]s collected in a [`CommandCatalog`]; the
//! [`CommandRegistry`] indexes them into an immutable snapshot. The
//! dispatcher tokenizes a line, resolves the command name, coerces the
//! arguments, invokes the handler and formats the result.

pub mod autocomplete;
pub mod builtins;
pub mod catalog;
pub mod console;
pub mod descriptor;
pub mod dispatcher;
pub mod formatter;
pub mod history;
pub mod log_mirror;
pub mod parser;
pub mod registry;
pub mod value;

/// Complete a partial command name against the registry.
pub use autocomplete::{Completion, CompletionAction, complete};
/// Register the built-in commands (help) into a catalog.
pub use builtins::register_builtins;
/// Ordered collection of candidate commands.
pub use catalog::CommandCatalog;
/// Interactive session wiring dispatch, history and output together.
pub use console::{BufferSink, Console, OutputSink};
/// A single invocable command and its signature.
pub use descriptor::{CommandContext, CommandDescriptor, Visibility};
/// Resolves and runs one invocation line.
pub use dispatcher::{Dispatcher, Outcome};
/// Bounded input history with up/down navigation.
pub use history::History;
/// Forwards host log records into the console.
pub use log_mirror::{LogMirror, MirrorHandle};
/// Validated index of commands with atomic rebuild.
pub use registry::{CommandRegistry, Snapshot};
/// Argument type tags and runtime values.
pub use value::{EnumType, TypeTag, Value};
