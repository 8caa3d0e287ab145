use anyhow::Result;
use colored::*;
use mend_core::colors::styled_target;
use mend_core::execution::{Executor, ExecutorOptions};
use mend_core::manager::BuildManager;
use mend_core::resolver::PlanStep;
use mend_core::results::TargetOutcome;

pub fn execute(
    manager: &BuildManager,
    target: Option<&str>,
    options: ExecutorOptions,
) -> Result<()> {
    let plan = manager.get_execution_plan(target)?;
    println!("{} {}", "Execution plan for".bold(), plan.root.cyan());

    let report = Executor::new(&manager.registry)
        .with_options(ExecutorOptions {
            dry_run: true,
            ..options
        })
        .execute(&plan)?;
    let mut records = report.records.iter();

    println!("\n{}:", "Execution order".bold());
    for (i, step) in plan.steps.iter().enumerate() {
        match step {
            PlanStep::Leaf { identifier, .. } => {
                println!("  {}. {} {}", i + 1, identifier, "(file)".dimmed());
            }
            PlanStep::Target { identifier } => {
                let (Some(record), Some(declared)) =
                    (records.next(), manager.registry.get(identifier))
                else {
                    continue;
                };
                let verdict = match record.outcome {
                    TargetOutcome::WouldRun => format!("would run: {}", record.staleness).yellow(),
                    _ => "up to date".green(),
                };
                println!("  {}. {} {}", i + 1, styled_target(declared), verdict);
            }
        }
    }

    Ok(())
}
