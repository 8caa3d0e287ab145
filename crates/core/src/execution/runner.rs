//! Plan executor
//!
//! Walks an execution plan in order, evaluates each target's staleness and runs
//! the actions of stale targets one at a time. The first failing action aborts
//! the run; nothing is rolled back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use tracing::debug;

use crate::colors::styled_target;
use crate::execution::command::CommandExecutor;
use crate::registry::{Registry, Target};
use crate::resolver::{ExecutionPlan, PlanStep};
use crate::results::{ExecutionReport, TargetOutcome, TargetRecord};
use crate::staleness::StalenessEvaluator;
use crate::types::{MendError, MendResult};

/// Configuration for the executor
#[derive(Debug, Default, Clone)]
pub struct ExecutorOptions {
    /// Evaluate staleness and report, but run nothing
    pub dry_run: bool,
    /// Treat every target as stale
    pub always_run: bool,
    /// Suppress per-target headers
    pub quiet: bool,
}

/// Sequential executor for one invocation
pub struct Executor<'a> {
    registry: &'a Registry,
    options: ExecutorOptions,
    interrupt: Arc<AtomicBool>,
}

impl<'a> Executor<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            options: ExecutorOptions::default(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    /// Share an interrupt flag; once set, no further action is launched
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Run every stale target of `plan` in order
    pub fn execute(&self, plan: &ExecutionPlan) -> MendResult<ExecutionReport> {
        let mut evaluator =
            StalenessEvaluator::new(self.registry).always_run(self.options.always_run);
        let mut report = ExecutionReport {
            root: plan.root.clone(),
            records: Vec::new(),
        };

        for step in &plan.steps {
            let identifier = match step {
                PlanStep::Leaf { identifier, .. } => {
                    evaluator.record_leaf(identifier);
                    continue;
                }
                PlanStep::Target { identifier } => identifier,
            };
            let target = self
                .registry
                .get(identifier)
                .ok_or_else(|| MendError::UnknownTarget(identifier.clone()))?;

            let staleness = evaluator.evaluate(target)?;
            let outcome = if !staleness.is_stale() {
                debug!(id = %identifier, "skipping up-to-date target");
                TargetOutcome::Skipped
            } else if self.options.dry_run {
                TargetOutcome::WouldRun
            } else {
                if self.interrupt.load(Ordering::SeqCst) {
                    return Err(MendError::Interrupted(Some(identifier.clone())));
                }
                self.print_header(target);
                CommandExecutor::new(self.registry.root(), identifier)
                    .execute(&target.action)
                    .map_err(|source| MendError::ActionFailed {
                        target: identifier.clone(),
                        source,
                    })?;
                TargetOutcome::Executed
            };

            report.records.push(TargetRecord {
                identifier: identifier.clone(),
                staleness,
                outcome,
            });
        }

        // A signal during the last action still fails the run
        if !self.options.dry_run && self.interrupt.load(Ordering::SeqCst) {
            return Err(MendError::Interrupted(None));
        }
        Ok(report)
    }

    fn print_header(&self, target: &Target) {
        if self.options.quiet {
            return;
        }
        println!(
            "┌─ {} {}",
            "Running target".bold(),
            styled_target(target).bold()
        );
        println!("└─ {}", target.action.to_string().bright_black());
    }
}
