use anyhow::Result;
use colored::*;
use mend_core::manager::BuildManager;
use mend_core::types::describe_cycle;

pub fn execute(manager: &BuildManager) -> Result<()> {
    println!("{}", "Target Dependency Graph:".bold().underline());

    let result = manager.get_dependency_graph();
    let graph = &result.graph;

    if !result.cycles.is_empty() {
        let cycles_description = result
            .cycles
            .iter()
            .map(|cycle| describe_cycle(cycle))
            .collect::<Vec<_>>()
            .join("; ");

        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("Circular dependencies detected: {}", cycles_description).yellow()
        );
    }

    for (from, prerequisite) in &result.unresolved {
        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!(
                "'{}' depends on '{}', which is neither a target nor a file",
                from, prerequisite
            )
            .yellow()
        );
    }

    for (node_index, node_weight) in graph.node_indices().zip(graph.node_weights()) {
        if manager.registry.get(node_weight).is_none() {
            continue;
        }
        println!("{}", node_weight.blue().bold());

        // petgraph yields neighbours newest-edge first
        let mut deps = graph
            .neighbors(node_index)
            .filter_map(|neighbor| graph.node_weight(neighbor).cloned())
            .collect::<Vec<_>>();
        deps.reverse();

        if !deps.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), deps.join(", "));
        } else {
            println!("  {}", "no dependencies".dimmed());
        }
        println!();
    }

    Ok(())
}
