//! Whole-registry dependency graph
//!
//! Unlike [`crate::resolver`], which only walks what one request reaches, this
//! builds a graph of every declared target so cycles and dangling prerequisites
//! can be reported up front.

use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::registry::Registry;
use crate::results::DependencyGraphResult;

/// Build the dependency graph of all declared targets.
///
/// Edges point from a target to its prerequisite. File prerequisites become
/// nodes of their own; prerequisites that resolve to nothing are collected in
/// `unresolved` instead.
pub fn build_dependency_graph(registry: &Registry) -> DependencyGraphResult {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();
    let mut unresolved = Vec::new();

    // Add all targets as nodes
    for target in registry.targets() {
        let node_index = graph.add_node(target.identifier.clone());
        node_indices.insert(target.identifier.clone(), node_index);
    }

    // Add edges for prerequisites
    for target in registry.targets() {
        let from_node = node_indices[&target.identifier];
        for prerequisite in &target.prerequisites {
            let to_node = match node_indices.get(prerequisite) {
                Some(&node) => node,
                None => match registry.lookup(prerequisite) {
                    Ok(_) => {
                        let node = graph.add_node(prerequisite.clone());
                        node_indices.insert(prerequisite.clone(), node);
                        node
                    }
                    Err(_) => {
                        unresolved.push((target.identifier.clone(), prerequisite.clone()));
                        continue;
                    }
                },
            };
            graph.add_edge(from_node, to_node, ());
        }
    }

    // Detect cycles using strongly connected components
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();

    DependencyGraphResult {
        graph,
        cycles,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Target;

    #[test]
    fn reports_every_cycle_sorted() {
        let mut registry = Registry::new(".");
        for target in [
            Target::phony("x").with_prerequisites(["y"]),
            Target::phony("y").with_prerequisites(["x"]),
            Target::phony("solo").with_prerequisites(["solo"]),
            Target::phony("fine"),
        ] {
            registry.register(target).unwrap();
        }

        let result = build_dependency_graph(&registry);
        assert_eq!(
            result.cycles,
            vec![
                vec!["solo".to_string()],
                vec!["x".to_string(), "y".to_string()],
            ]
        );
    }

    #[test]
    fn files_become_nodes_and_dangling_prerequisites_are_collected() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("requirements.txt"), "pytest").unwrap();
        let mut registry = Registry::new(temp_dir.path());
        registry
            .register(Target::new("venv").with_prerequisites(["requirements.txt", "setup.cfg"]))
            .unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(result.graph.node_count(), 2);
        assert_eq!(result.graph.edge_count(), 1);
        assert!(result.cycles.is_empty());
        assert_eq!(
            result.unresolved,
            vec![("venv".to_string(), "setup.cfg".to_string())]
        );
    }
}
