//! The registration table: every candidate command visible to the host.
//!
//! A catalog is the explicit stand-in for discovering annotated operations
//! at runtime. Hosts fill it with descriptors, then the registry validates
//! and indexes it on every rebuild.

use std::sync::Arc;

use crate::descriptor::CommandDescriptor;

/// Ordered collection of candidate descriptors.
#[derive(Debug, Default, Clone)]
pub struct CommandCatalog {
    entries: Vec<Arc<CommandDescriptor>>,
}

impl CommandCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with the console built-ins.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        crate::builtins::register_builtins(&mut catalog);
        catalog
    }

    /// Add a candidate. Validation happens at registry build time.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> &mut Self {
        self.entries.push(Arc::new(descriptor));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.entries.iter()
    }
}
