//! Command descriptors: the immutable record of one registered operation.

use std::fmt;
use std::sync::Arc;

use uniconsole_types::config::ConsoleConfig;
use uniconsole_types::error::{ConsoleError, Result};

use crate::registry::Snapshot;
use crate::value::{TypeTag, Value};

/// Text shown by `help <name>` for commands registered without a description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Callable behind a command.
pub type Handler = dyn Fn(&CommandContext<'_>) -> Result<Value> + Send + Sync;

/// Whether a command is admitted by default registry builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Only admitted when private commands are allowed.
    Private,
}

/// Everything a command sees when it is invoked.
pub struct CommandContext<'a> {
    /// Arguments, already coerced to the declared parameter types.
    pub args: &'a [Value],
    /// The registry snapshot the command was resolved from.
    pub snapshot: &'a Snapshot,
    /// Console options.
    pub config: &'a ConsoleConfig,
}

impl CommandContext<'_> {
    /// Argument at `index`.
    pub fn arg(&self, index: usize) -> Result<&Value> {
        self.args
            .get(index)
            .ok_or_else(|| ConsoleError::Argument(format!("missing argument {index}")))
    }

    pub fn int(&self, index: usize) -> Result<i64> {
        let v = self.arg(index)?;
        v.as_int().ok_or_else(|| mismatch(index, "int", v))
    }

    pub fn float(&self, index: usize) -> Result<f64> {
        let v = self.arg(index)?;
        v.as_float().ok_or_else(|| mismatch(index, "float", v))
    }

    pub fn bool(&self, index: usize) -> Result<bool> {
        let v = self.arg(index)?;
        v.as_bool().ok_or_else(|| mismatch(index, "bool", v))
    }

    /// String argument, or the member name of an enum argument.
    pub fn str(&self, index: usize) -> Result<&str> {
        let v = self.arg(index)?;
        v.as_str().ok_or_else(|| mismatch(index, "string", v))
    }

    pub fn array(&self, index: usize) -> Result<&[Value]> {
        let v = self.arg(index)?;
        v.as_array().ok_or_else(|| mismatch(index, "array", v))
    }
}

fn mismatch(index: usize, expected: &str, got: &Value) -> ConsoleError {
    ConsoleError::Argument(format!(
        "argument {index}: expected {expected}, got {}",
        got.kind()
    ))
}

/// Immutable description of one invocable operation.
pub struct CommandDescriptor {
    name: String,
    scope: String,
    namespace: Option<String>,
    params: Vec<TypeTag>,
    returns: TypeTag,
    description: Option<String>,
    visibility: Visibility,
    handler: Arc<Handler>,
}

impl CommandDescriptor {
    /// Start describing command `name` declared in `scope`.
    pub fn builder(scope: impl Into<String>, name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            scope: scope.into(),
            namespace: None,
            params: Vec::new(),
            returns: TypeTag::Void,
            description: None,
            visibility: Visibility::Public,
        }
    }

    /// The invocation keyword.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn returns(&self) -> &TypeTag {
        &self.returns
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Fully qualified name, including the namespace when there is one.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}.{}", self.scope, self.name),
            None => format!("{}.{}", self.scope, self.name),
        }
    }

    /// Scope-qualified aliases that resolve to this command.
    pub fn qualified_names(&self) -> Vec<String> {
        let mut names = vec![format!("{}.{}", self.scope, self.name)];
        if let Some(ns) = &self.namespace {
            names.push(format!("{ns}.{}.{}", self.scope, self.name));
        }
        names
    }

    /// `name(int, int) -> string`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({}) -> {}", self.name, params.join(", "), self.returns)
    }

    /// Run the command body.
    pub fn invoke(&self, ctx: &CommandContext<'_>) -> Result<Value> {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("namespace", &self.namespace)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`CommandDescriptor::builder`].
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: String,
    scope: String,
    namespace: Option<String>,
    params: Vec<TypeTag>,
    returns: TypeTag,
    description: Option<String>,
    visibility: Visibility,
}

impl DescriptorBuilder {
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a positional parameter.
    pub fn param(mut self, tag: TypeTag) -> Self {
        self.params.push(tag);
        self
    }

    pub fn returns(mut self, tag: TypeTag) -> Self {
        self.returns = tag;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Attach the command body and finish the descriptor.
    pub fn handler<F>(self, f: F) -> CommandDescriptor
    where
        F: Fn(&CommandContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        CommandDescriptor {
            name: self.name,
            scope: self.scope,
            namespace: self.namespace,
            params: self.params,
            returns: self.returns,
            description: self.description,
            visibility: self.visibility,
            handler: Arc::new(f),
        }
    }
}
