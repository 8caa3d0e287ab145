//! Mend Core Library
//!
//! This is the core library for the mend target runner. Given a set of named
//! targets with prerequisites and actions, it works out which targets are out of
//! date and runs only the necessary actions, in dependency order, each at most
//! once per invocation.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`registry`] - Declared targets and identifier lookup
//! - [`resolver`] - Depth-first expansion of a request into an execution plan
//! - [`staleness`] - Timestamp-based staleness verdicts
//! - [`execution`] - Sequential plan execution and command spawning
//! - [`manager`] - High-level interface used by the CLI
//! - [`configs`] - YAML declaration file parsing
//! - [`graph`] - Whole-registry dependency graph and cycle report
//! - [`results`] - Result types for executor and manager operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! Targets can be registered directly and executed without a declaration file:
//!
//! ```rust,no_run
//! use mend_core::execution::Executor;
//! use mend_core::registry::{Action, Registry, Target};
//! use mend_core::resolver::resolve;
//!
//! # fn example() -> mend_core::types::MendResult<()> {
//! let mut registry = Registry::new(".");
//! registry.register(
//!     Target::new("b.out")
//!         .with_prerequisites(["c.txt"])
//!         .with_action(Action::Shell("cp c.txt b.out".into())),
//! )?;
//! registry.register(Target::phony("all").with_prerequisites(["b.out"]))?;
//!
//! let plan = resolve(&registry, "all")?;
//! let report = Executor::new(&registry).execute(&plan)?;
//! println!("ran {:?}", report.executed());
//! # Ok(())
//! # }
//! ```

pub mod colors;
pub mod configs;
pub mod execution;
pub mod graph;
pub mod manager;
pub mod registry;
pub mod resolver;
pub mod results;
pub mod staleness;
pub mod types;

// Re-export the main types for easier usage
pub use manager::{BuildManager, BuildManagerConfig};
pub use types::{MendError, MendResult};
