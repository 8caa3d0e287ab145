//! Target execution module
//!
//! This module runs the actions of an execution plan: spawning external
//! commands and walking the plan in order.

pub mod command;
pub mod runner;

pub use command::CommandExecutor;
pub use runner::{Executor, ExecutorOptions};
