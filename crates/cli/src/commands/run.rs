use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use colored::*;
use mend_core::execution::ExecutorOptions;
use mend_core::manager::BuildManager;

pub async fn execute(
    manager: BuildManager,
    target: Option<String>,
    options: ExecutorOptions,
) -> Result<()> {
    let quiet = options.quiet;

    // Stop launching actions on Ctrl-C; the running child gets the signal from the terminal
    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        flag.store(true, Ordering::SeqCst);
        eprintln!(
            "{}",
            "Interrupted, waiting for the running action to finish (Ctrl-C again to quit)"
                .yellow()
        );

        // The handler replaced the default one, so a second signal must exit by hand
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let report = tokio::task::spawn_blocking(move || {
        manager.run_target(target.as_deref(), options, Some(interrupt))
    })
    .await??;

    if quiet {
        return Ok(());
    }

    let executed = report.executed();
    println!();
    if executed.is_empty() {
        println!(
            "{} {}",
            "✓".green().bold(),
            format!("'{}' is up to date", report.root).green()
        );
    } else {
        println!(
            "{} {}",
            "✓".green().bold(),
            format!(
                "{} completed ({} ran, {} up to date)",
                report.root,
                executed.len(),
                report.skipped().len()
            )
            .green()
            .bold()
        );
    }

    Ok(())
}
