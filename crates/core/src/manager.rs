//! High-level build management interface
//!
//! This module provides the [`BuildManager`] which serves as the primary interface
//! for all operations on a declaration file. It encapsulates loading the
//! declarations, resolving execution plans and running them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mend_core::execution::ExecutorOptions;
//! use mend_core::manager::{BuildManager, BuildManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> mend_core::types::MendResult<()> {
//! let manager = BuildManager::new(BuildManagerConfig {
//!     root: PathBuf::from("."),
//!     file: None,
//! })?;
//!
//! // Show what `test` would need
//! let plan = manager.get_execution_plan(Some("test"))?;
//!
//! // Run the default target
//! manager.run_target(None, ExecutorOptions::default(), None)?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::debug;

use crate::configs::parse_targets_config;
use crate::execution::{Executor, ExecutorOptions};
use crate::graph::build_dependency_graph;
use crate::registry::Registry;
use crate::resolver::{resolve, ExecutionPlan};
use crate::results::{DependencyGraphResult, ExecutionReport, TargetInfo, TargetListResult};
use crate::types::{MendError, MendResult};

/// Declaration file looked up in the root when none is given
pub const DEFAULT_TARGETS_FILE: &str = "mend.yml";

/// Configuration for initializing a build manager
pub struct BuildManagerConfig {
    pub root: PathBuf,
    /// Declaration file; relative paths resolve against `root`
    pub file: Option<PathBuf>,
}

/// High-level manager that encapsulates all operations on one registry
pub struct BuildManager {
    pub registry: Registry,
    pub name: Option<String>,
}

impl BuildManager {
    /// Load the declaration file and build the registry
    pub fn new(config: BuildManagerConfig) -> MendResult<Self> {
        // Actions run with the root as their working directory
        let root = std::path::absolute(&config.root)?;
        let file = config
            .file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGETS_FILE));
        let file = if file.is_relative() {
            root.join(file)
        } else {
            file
        };

        let content = Self::read_targets_file(&file)?;
        let targets_config = parse_targets_config(&content).map_err(|e| {
            MendError::Config(format!("Failed to parse {}: {}", file.display(), e))
        })?;
        let name = targets_config.name.clone();
        let registry = targets_config.into_registry(&root)?;
        debug!(file = %file.display(), targets = registry.len(), "loaded declarations");

        Ok(Self { registry, name })
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self {
            registry,
            name: None,
        }
    }

    /// List all declared targets
    pub fn list_targets(&self) -> TargetListResult {
        let default_target = self.registry.default_target().map(str::to_string);
        let targets = self
            .registry
            .targets()
            .map(|target| TargetInfo {
                name: target.identifier.clone(),
                description: target.description.clone(),
                phony: target.phony,
                output: target.output.clone(),
                prerequisites: target.prerequisites.clone(),
                is_default: default_target.as_deref() == Some(target.identifier.as_str()),
            })
            .collect();

        TargetListResult {
            targets,
            default_target,
        }
    }

    /// Get the execution plan for a target, or for the default target
    pub fn get_execution_plan(&self, target: Option<&str>) -> MendResult<ExecutionPlan> {
        let target = self.requested_target(target)?;
        resolve(&self.registry, &target)
    }

    /// Resolve and execute a target
    pub fn run_target(
        &self,
        target: Option<&str>,
        options: ExecutorOptions,
        interrupt: Option<Arc<AtomicBool>>,
    ) -> MendResult<ExecutionReport> {
        let plan = self.get_execution_plan(target)?;

        let mut executor = Executor::new(&self.registry).with_options(options);
        if let Some(interrupt) = interrupt {
            executor = executor.with_interrupt(interrupt);
        }
        executor.execute(&plan)
    }

    /// Get dependency graph information for every declared target
    pub fn get_dependency_graph(&self) -> DependencyGraphResult {
        build_dependency_graph(&self.registry)
    }

    fn requested_target(&self, target: Option<&str>) -> MendResult<String> {
        match target.or_else(|| self.registry.default_target()) {
            Some(target) => Ok(target.to_string()),
            None => Err(MendError::Config("No targets declared".to_string())),
        }
    }

    fn read_targets_file(path: &Path) -> MendResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            MendError::Config(format!(
                "Failed to read declaration file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
