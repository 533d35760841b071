//! Validated, indexed command snapshots.
//!
//! A [`CommandRegistry`] is empty until the first [`CommandRegistry::rebuild`].
//! Each rebuild validates a catalog into a fresh [`Snapshot`] and swaps it in
//! under a write lock; a failed rebuild leaves the previous snapshot in place.
//! Names are matched case-insensitively and overloads (same name, different
//! parameter types) are kept in registration order.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use uniconsole_types::config::NamePolicy;
use uniconsole_types::error::{ConsoleError, Result};

use crate::catalog::CommandCatalog;
use crate::descriptor::{CommandDescriptor, Visibility};
use crate::value::TypeTag;

/// One immutable build of the registry.
#[derive(Debug, Default)]
pub struct Snapshot {
    commands: Vec<Arc<CommandDescriptor>>,
    by_name: HashMap<String, Vec<usize>>,
    by_alias: HashMap<String, Vec<usize>>,
}

impl Snapshot {
    /// Validate and index the admitted entries of `catalog`.
    pub fn build(catalog: &CommandCatalog, include_private: bool, policy: NamePolicy) -> Result<Self> {
        let mut snapshot = Self::default();
        let mut signatures: HashSet<(String, Vec<TypeTag>)> = HashSet::new();

        for desc in catalog.iter() {
            if desc.visibility() == Visibility::Private && !include_private {
                continue;
            }
            if !policy.accepts(desc.name()) {
                return Err(ConsoleError::InvalidCommandName(format!(
                    "\"{}\" declared in {}",
                    desc.name().escape_debug(),
                    desc.scope()
                )));
            }
            if let Some(bad) = desc.params().iter().find(|p| !is_parameter_type(p)) {
                return Err(ConsoleError::InvalidSignature(format!(
                    "{}: parameter of type {bad} is not allowed",
                    desc.full_name()
                )));
            }

            // Signatures are unique per fully qualified name.
            if !signatures.insert((desc.full_name().to_lowercase(), desc.params().to_vec())) {
                return Err(ConsoleError::InvalidCommandName(format!(
                    "duplicate command {}",
                    desc.signature()
                )));
            }

            let index = snapshot.commands.len();
            snapshot
                .by_name
                .entry(desc.name().to_lowercase())
                .or_default()
                .push(index);
            for alias in desc.qualified_names() {
                snapshot
                    .by_alias
                    .entry(alias.to_lowercase())
                    .or_default()
                    .push(index);
            }
            snapshot.commands.push(Arc::clone(desc));
        }

        Ok(snapshot)
    }

    /// All descriptors in registration order.
    pub fn commands(&self) -> &[Arc<CommandDescriptor>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Descriptors whose name equals `name`, ignoring case.
    pub fn lookup(&self, name: &str) -> Vec<&Arc<CommandDescriptor>> {
        self.indexed(&self.by_name, name)
    }

    /// Descriptors reachable through a scope-qualified alias.
    pub fn lookup_qualified(&self, alias: &str) -> Vec<&Arc<CommandDescriptor>> {
        self.indexed(&self.by_alias, alias)
    }

    /// Descriptors whose name starts with `prefix`, ignoring case.
    pub fn lookup_by_prefix(&self, prefix: &str) -> Vec<&Arc<CommandDescriptor>> {
        let prefix = prefix.to_lowercase();
        self.commands
            .iter()
            .filter(|d| d.name().to_lowercase().starts_with(&prefix))
            .collect()
    }

    /// Number of descriptors sharing `name`.
    pub fn name_count(&self, name: &str) -> usize {
        self.by_name
            .get(&name.to_lowercase())
            .map_or(0, Vec::len)
    }

    /// Whether another descriptor shares this descriptor's name.
    pub fn is_ambiguous(&self, desc: &CommandDescriptor) -> bool {
        self.name_count(desc.name()) > 1
    }

    fn indexed(&self, index: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&Arc<CommandDescriptor>> {
        index
            .get(&key.to_lowercase())
            .map(|ids| ids.iter().map(|&i| &self.commands[i]).collect())
            .unwrap_or_default()
    }
}

/// Void and tuples can be returned but never passed.
fn is_parameter_type(tag: &TypeTag) -> bool {
    match tag {
        TypeTag::Void | TypeTag::Tuple(_) => false,
        TypeTag::Array(elem) => is_parameter_type(elem),
        _ => true,
    }
}

/// Process-wide command registry with an explicit build lifecycle.
#[derive(Debug)]
pub struct CommandRegistry {
    current: RwLock<Option<Arc<Snapshot>>>,
    name_policy: NamePolicy,
}

impl CommandRegistry {
    /// Create an unbuilt registry.
    pub fn new(name_policy: NamePolicy) -> Self {
        Self {
            current: RwLock::new(None),
            name_policy,
        }
    }

    /// Validate `catalog` and atomically replace the current snapshot.
    ///
    /// All-or-nothing: on error the previous snapshot stays active.
    pub fn rebuild(&self, catalog: &CommandCatalog, include_private: bool) -> Result<()> {
        let snapshot = Snapshot::build(catalog, include_private, self.name_policy)?;
        log::info!(
            "command registry rebuilt: {} of {} candidates admitted",
            snapshot.len(),
            catalog.len()
        );
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::new(snapshot));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The active snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
            .ok_or(ConsoleError::NotInitialized)
    }

    /// Case-insensitive exact name lookup, in registration order.
    pub fn lookup(&self, name: &str) -> Result<Vec<Arc<CommandDescriptor>>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.lookup(name).into_iter().map(Arc::clone).collect())
    }

    /// Case-insensitive `scope.name` / `namespace.scope.name` lookup.
    pub fn lookup_qualified(&self, alias: &str) -> Result<Vec<Arc<CommandDescriptor>>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .lookup_qualified(alias)
            .into_iter()
            .map(Arc::clone)
            .collect())
    }

    /// Case-insensitive prefix lookup, in registration order.
    pub fn lookup_by_prefix(&self, prefix: &str) -> Result<Vec<Arc<CommandDescriptor>>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .lookup_by_prefix(prefix)
            .into_iter()
            .map(Arc::clone)
            .collect())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(NamePolicy::default())
    }
}
