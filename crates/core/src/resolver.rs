//! Graph resolution
//!
//! Expands a requested target into an ordered, duplicate-free execution plan
//! using a depth-first walk over the registry. Prerequisites are visited in
//! declaration order and emitted before their dependents; the first discovery
//! of a target fixes its position.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::registry::{Node, Registry};
use crate::types::{MendError, MendResult};

/// One entry of an execution plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// A plain file prerequisite; never runs anything
    Leaf { identifier: String, path: PathBuf },
    Target { identifier: String },
}

impl PlanStep {
    pub fn identifier(&self) -> &str {
        match self {
            PlanStep::Leaf { identifier, .. } | PlanStep::Target { identifier } => identifier,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PlanStep::Leaf { .. })
    }
}

/// Ordered steps for one requested target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub root: String,
    pub steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    pub fn identifiers(&self) -> Vec<&str> {
        self.steps.iter().map(PlanStep::identifier).collect()
    }

    /// Steps that correspond to declared targets
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|step| !step.is_leaf())
            .map(PlanStep::identifier)
    }
}

/// Compute the execution plan for `root`
pub fn resolve(registry: &Registry, root: &str) -> MendResult<ExecutionPlan> {
    let mut walk = Walk {
        registry,
        path: Vec::new(),
        done: HashSet::new(),
        steps: Vec::new(),
    };
    walk.visit(root)?;

    debug!(root, steps = walk.steps.len(), "resolved execution plan");
    Ok(ExecutionPlan {
        root: root.to_string(),
        steps: walk.steps,
    })
}

struct Walk<'a> {
    registry: &'a Registry,
    /// Targets currently being visited, outermost first
    path: Vec<&'a str>,
    done: HashSet<&'a str>,
    steps: Vec<PlanStep>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, identifier: &'a str) -> MendResult<()> {
        if self.done.contains(identifier) {
            return Ok(());
        }
        if let Some(start) = self.path.iter().position(|id| *id == identifier) {
            let cycle = self.path[start..].iter().map(|id| id.to_string()).collect();
            return Err(MendError::CyclicDependency(cycle));
        }

        match self.registry.lookup(identifier)? {
            Node::File(file) => {
                self.done.insert(file);
                self.steps.push(PlanStep::Leaf {
                    identifier: file.to_string(),
                    path: self.registry.resolve_path(Path::new(file)),
                });
            }
            Node::Target(target) => {
                self.path.push(&target.identifier);
                for prerequisite in &target.prerequisites {
                    self.visit(prerequisite)?;
                }
                self.path.pop();

                self.done.insert(&target.identifier);
                self.steps.push(PlanStep::Target {
                    identifier: target.identifier.clone(),
                });
            }
        }
        Ok(())
    }
}
