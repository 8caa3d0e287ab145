//! Result types for build manager operations
//!
//! This module contains the result types returned by executor and build manager
//! operations, providing a centralized location for output structures.

use std::path::PathBuf;

use crate::staleness::Staleness;

/// What happened to a target during one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The action ran to completion
    Executed,
    /// The target was up to date
    Skipped,
    /// Dry run: the action would have run
    WouldRun,
}

/// A target's verdict and outcome
#[derive(Debug, Clone)]
pub struct TargetRecord {
    pub identifier: String,
    pub staleness: Staleness,
    pub outcome: TargetOutcome,
}

/// Outcome of executing one plan, in plan order
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub root: String,
    pub records: Vec<TargetRecord>,
}

impl ExecutionReport {
    pub fn executed(&self) -> Vec<&str> {
        self.with_outcome(TargetOutcome::Executed)
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.with_outcome(TargetOutcome::Skipped)
    }

    pub fn would_run(&self) -> Vec<&str> {
        self.with_outcome(TargetOutcome::WouldRun)
    }

    fn with_outcome(&self, outcome: TargetOutcome) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| record.outcome == outcome)
            .map(|record| record.identifier.as_str())
            .collect()
    }
}

/// Information about a declared target
#[derive(Debug, Clone)]
pub struct TargetInfo {
    pub name: String,
    pub description: Option<String>,
    pub phony: bool,
    pub output: Option<PathBuf>,
    pub prerequisites: Vec<String>,
    pub is_default: bool,
}

/// Result of listing the declared targets
#[derive(Debug)]
pub struct TargetListResult {
    pub targets: Vec<TargetInfo>,
    pub default_target: Option<String>,
}

/// Result of getting the dependency graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: petgraph::Graph<String, ()>,
    pub cycles: Vec<Vec<String>>,
    /// `(target, prerequisite)` pairs whose prerequisite resolves to nothing
    pub unresolved: Vec<(String, String)>,
}
