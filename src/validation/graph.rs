//! Diagram graph validation
//!
//! Checks the structural invariants of a diagram graph: one diagram root,
//! exactly one containment edge from the root to every element, and
//! requirement edges only between DRG elements. Requirement cycles are
//! reported separately and do not make a graph invalid.

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::graph::{DiagramGraph, EdgeContent, NodeContent};

/// Structural problem found in a diagram graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum GraphIssue {
    #[error("diagram has no root node")]
    MissingRoot,
    #[error("diagram has {0} root nodes")]
    MultipleRoots(usize),
    #[error("element '{element}' has {count} containment edges from the root")]
    Containment { element: String, count: usize },
    #[error("containment edge starts at non-root node '{0}'")]
    ContainmentFromElement(String),
    #[error("requirement edge from '{source_id}' to '{target}' does not connect two DRG elements")]
    RequirementEndpoint { source_id: String, target: String },
    #[error("requirement edge on '{0}' points to itself")]
    SelfRequirement(String),
}

/// Result of graph validation.
#[derive(Debug, Default, Serialize, Deserialize)]
#[must_use = "validation results should be checked for structural issues"]
pub struct GraphValidationResult {
    /// Invariant violations
    pub issues: Vec<GraphIssue>,
    /// Id of an element on a requirement cycle, if any
    pub requirement_cycle: Option<String>,
}

impl GraphValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Diagram graph validator
#[derive(Default)]
pub struct GraphValidator;

fn label(graph: &DiagramGraph, index: NodeIndex) -> String {
    match graph.node(index) {
        Some(NodeContent::DiagramRoot(_)) => "<root>".to_string(),
        Some(node) => node
            .element_id()
            .map(|id| id.value().to_string())
            .unwrap_or_default(),
        None => format!("#{}", index.index()),
    }
}

impl GraphValidator {
    /// Create a new graph validator
    ///
    /// # Example
    ///
    /// ```rust
    /// use dmn_editor_core::models::graph::{DefaultGraphFactory, GraphFactory, Metadata};
    /// use dmn_editor_core::validation::graph::GraphValidator;
    ///
    /// let graph = DefaultGraphFactory.build(Metadata::new("n", "urn:n"));
    /// assert!(GraphValidator::new().validate(&graph).is_valid());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Validate every structural invariant of `graph`
    pub fn validate(&self, graph: &DiagramGraph) -> GraphValidationResult {
        let mut result = GraphValidationResult::default();

        let roots: Vec<NodeIndex> = graph
            .nodes()
            .filter(|(_, n)| n.is_root())
            .map(|(i, _)| i)
            .collect();
        match roots.len() {
            0 => result.issues.push(GraphIssue::MissingRoot),
            1 => {}
            n => result.issues.push(GraphIssue::MultipleRoots(n)),
        }

        let mut containment: HashMap<NodeIndex, usize> = HashMap::new();
        for (source, target, edge) in graph.edges() {
            match edge {
                EdgeContent::Child => {
                    if roots.contains(&source) {
                        *containment.entry(target).or_default() += 1;
                    } else {
                        result
                            .issues
                            .push(GraphIssue::ContainmentFromElement(label(graph, source)));
                    }
                }
                edge if edge.is_requirement() => {
                    let both_drg = [source, target]
                        .iter()
                        .all(|&i| matches!(graph.node(i), Some(NodeContent::DrgElement(_))));
                    if !both_drg {
                        result.issues.push(GraphIssue::RequirementEndpoint {
                            source_id: label(graph, source),
                            target: label(graph, target),
                        });
                    } else if source == target {
                        result
                            .issues
                            .push(GraphIssue::SelfRequirement(label(graph, source)));
                    }
                }
                _ => {}
            }
        }

        for (index, node) in graph.nodes() {
            if node.is_root() {
                continue;
            }
            let count = containment.get(&index).copied().unwrap_or(0);
            if count != 1 {
                result.issues.push(GraphIssue::Containment {
                    element: label(graph, index),
                    count,
                });
            }
        }

        result.requirement_cycle = self.find_requirement_cycle(graph);
        result
    }

    /// Find an element on a requirement cycle
    ///
    /// Builds a graph of requirement edges only and topologically sorts it.
    pub fn find_requirement_cycle(&self, graph: &DiagramGraph) -> Option<String> {
        let mut requirements = Graph::<NodeIndex, (), Directed>::new();
        let mut node_map = HashMap::new();

        for (source, target, edge) in graph.edges() {
            if !edge.is_requirement() {
                continue;
            }
            let s = *node_map
                .entry(source)
                .or_insert_with(|| requirements.add_node(source));
            let t = *node_map
                .entry(target)
                .or_insert_with(|| requirements.add_node(target));
            requirements.add_edge(s, t, ());
        }

        toposort(&requirements, None)
            .err()
            .map(|cycle| label(graph, requirements[cycle.node_id()]))
    }
}
