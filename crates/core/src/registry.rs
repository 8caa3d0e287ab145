//! Target registry
//!
//! Holds the declared targets of one invocation. The registry is built once
//! from static declarations and is read-only afterwards; lookups fall back to
//! the file system so plain files can act as prerequisites.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::types::{MendError, MendResult};

/// In-process action, mostly useful for embedders and tests
pub type ActionFn = Arc<dyn Fn() -> Result<(), String> + Send + Sync>;

/// The step bound to a target. The engine never looks at what an action
/// does, only whether it completed successfully.
#[derive(Clone, Default)]
pub enum Action {
    /// Groups prerequisites without doing anything itself
    #[default]
    None,
    /// A command line run through `sh -c`
    Shell(String),
    /// A program with explicit arguments
    Exec { program: String, args: Vec<String> },
    /// A script file, relative paths resolve against the registry root
    Script(PathBuf),
    Callable(ActionFn),
}

impl Action {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), String> + Send + Sync + 'static,
    {
        Action::Callable(Arc::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => write!(f, "None"),
            Action::Shell(cmd) => f.debug_tuple("Shell").field(cmd).finish(),
            Action::Exec { program, args } => f
                .debug_struct("Exec")
                .field("program", program)
                .field("args", args)
                .finish(),
            Action::Script(path) => f.debug_tuple("Script").field(path).finish(),
            Action::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => write!(f, "(no action)"),
            Action::Shell(cmd) => write!(f, "{}", cmd),
            Action::Exec { program, args } => {
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
            Action::Script(path) => write!(f, "{}", path.display()),
            Action::Callable(_) => write!(f, "(callable)"),
        }
    }
}

/// A named unit of work
#[derive(Debug, Clone)]
pub struct Target {
    pub identifier: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    pub action: Action,
    /// Phony targets have no artifact and always run when reached
    pub phony: bool,
    /// Artifact path for file-backed targets; defaults to the identifier
    pub output: Option<PathBuf>,
}

impl Target {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: None,
            prerequisites: Vec::new(),
            action: Action::None,
            phony: false,
            output: None,
        }
    }

    pub fn phony(identifier: impl Into<String>) -> Self {
        Self {
            phony: true,
            ..Self::new(identifier)
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Path of the artifact this target produces, relative to the registry root
    pub fn artifact(&self) -> Option<&Path> {
        if self.phony {
            return None;
        }
        Some(
            self.output
                .as_deref()
                .unwrap_or_else(|| Path::new(&self.identifier)),
        )
    }
}

/// What an identifier resolves to
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Target(&'a Target),
    /// A plain file with no registry entry; always satisfied, contributes only its timestamp
    File(&'a str),
}

/// Mapping from identifier to target
#[derive(Debug)]
pub struct Registry {
    root: PathBuf,
    targets: HashMap<String, Target>,
    order: Vec<String>,
    default_target: Option<String>,
}

impl Registry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            targets: HashMap::new(),
            order: Vec::new(),
            default_target: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a target; identifiers are unique
    pub fn register(&mut self, target: Target) -> MendResult<()> {
        if self.targets.contains_key(&target.identifier) {
            return Err(MendError::DuplicateTarget(target.identifier));
        }
        debug!(id = %target.identifier, phony = target.phony, "registered target");
        self.order.push(target.identifier.clone());
        self.targets.insert(target.identifier.clone(), target);
        Ok(())
    }

    /// Resolve an identifier to a declared target, or to an existing file
    pub fn lookup<'a>(&'a self, identifier: &'a str) -> MendResult<Node<'a>> {
        if let Some(target) = self.targets.get(identifier) {
            return Ok(Node::Target(target));
        }
        if self.resolve_path(Path::new(identifier)).exists() {
            return Ok(Node::File(identifier));
        }
        Err(MendError::UnknownTarget(identifier.to_string()))
    }

    pub fn get(&self, identifier: &str) -> Option<&Target> {
        self.targets.get(identifier)
    }

    /// Targets in declaration order
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.order.iter().filter_map(|id| self.targets.get(id))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn set_default_target(&mut self, identifier: impl Into<String>) {
        self.default_target = Some(identifier.into());
    }

    /// The explicitly configured default, else the first declared target
    pub fn default_target(&self) -> Option<&str> {
        self.default_target
            .as_deref()
            .or_else(|| self.order.first().map(String::as_str))
    }

    /// Resolve a path relative to the registry root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
