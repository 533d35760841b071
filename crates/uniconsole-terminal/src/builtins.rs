//! Commands the console registers on its own.

use std::collections::BTreeMap;

use uniconsole_types::error::{ConsoleError, Result};

use crate::catalog::CommandCatalog;
use crate::descriptor::{CommandContext, CommandDescriptor, NO_DESCRIPTION};
use crate::dispatcher::CLEAR_KEYWORD;
use crate::registry::Snapshot;
use crate::value::{TypeTag, Value};

/// Scope under which built-in commands are declared.
pub const BUILTIN_SCOPE: &str = "Console";

const CLEAR_DESCRIPTION: &str = "Clear the console output";

/// Register the built-in commands into a catalog.
pub fn register_builtins(catalog: &mut CommandCatalog) {
    catalog
        .register(
            CommandDescriptor::builder(BUILTIN_SCOPE, "help")
                .returns(TypeTag::String)
                .description("List every available command")
                .handler(|ctx| Ok(Value::Str(command_listing(ctx.snapshot)))),
        )
        .register(
            CommandDescriptor::builder(BUILTIN_SCOPE, "help")
                .param(TypeTag::String)
                .returns(TypeTag::String)
                .description("Describe every command with the given name")
                .handler(describe_command),
        );
}

/// Listing of every command in `snapshot`, grouped by declaring scope.
///
/// Each line shows the name, parameter types, the return type when there is
/// one, and the qualified name when the bare name is ambiguous.
pub fn command_listing(snapshot: &Snapshot) -> String {
    let mut scopes: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    scopes
        .entry(BUILTIN_SCOPE)
        .or_default()
        .push(CLEAR_KEYWORD.to_string());

    for desc in snapshot.commands() {
        let mut line = desc.name().to_string();
        for p in desc.params() {
            line.push(' ');
            line.push_str(&p.to_string());
        }
        if *desc.returns() != TypeTag::Void {
            line.push_str(&format!(" -> {}", desc.returns()));
        }
        if snapshot.is_ambiguous(desc) {
            line.push_str(&format!("  ({})", desc.full_name()));
        }
        scopes.entry(desc.scope()).or_default().push(line);
    }

    let total: usize = scopes.values().map(Vec::len).sum();
    let mut out = format!("Available commands ({total}):\n");
    for (scope, lines) in &mut scopes {
        lines.sort_by_key(|l| l.to_lowercase());
        out.push_str(&format!("\n  [{scope}]\n"));
        for line in lines.iter() {
            out.push_str(&format!("    {line}\n"));
        }
    }
    out.push_str("\nType 'help <command>' for details.");
    out
}

fn describe_command(ctx: &CommandContext<'_>) -> Result<Value> {
    let name = ctx.str(0)?;
    if name.eq_ignore_ascii_case(CLEAR_KEYWORD) {
        return Ok(Value::Str(format!("{CLEAR_KEYWORD}\n  {CLEAR_DESCRIPTION}")));
    }

    let mut matches = ctx.snapshot.lookup(name);
    if matches.is_empty() {
        matches = ctx.snapshot.lookup_qualified(name);
    }
    if matches.is_empty() {
        return Err(ConsoleError::Command(format!("unknown command: {name}")));
    }

    let blocks: Vec<String> = matches
        .iter()
        .map(|d| {
            format!(
                "{}  [{}]\n  {}",
                d.signature(),
                d.full_name(),
                d.description().unwrap_or(NO_DESCRIPTION)
            )
        })
        .collect();
    Ok(Value::Str(blocks.join("\n")))
}
