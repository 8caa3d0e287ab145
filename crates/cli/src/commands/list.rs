use anyhow::Result;
use colored::*;
use mend_core::manager::BuildManager;

pub fn execute(manager: &BuildManager) -> Result<()> {
    let result = manager.list_targets();

    let heading = match &manager.name {
        Some(name) => format!("Targets ({})", name),
        None => "Targets".to_string(),
    };
    println!("{}", heading.bold().underline());

    if result.targets.is_empty() {
        println!("  {}", "No targets declared".dimmed());
        return Ok(());
    }

    for target in &result.targets {
        let mut line = target.name.blue().bold().to_string();
        if target.is_default {
            line.push_str(&format!(" {}", "[default]".green()));
        }
        if target.phony {
            line.push_str(&format!(" {}", "phony".dimmed()));
        } else if let Some(output) = &target.output {
            line.push_str(&format!(" {}", format!("-> {}", output.display()).dimmed()));
        }
        println!("{}", line);

        if let Some(description) = &target.description {
            println!("  {}", description);
        }
    }

    Ok(())
}
