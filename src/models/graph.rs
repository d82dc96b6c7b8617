//! Diagram graph
//!
//! A directed petgraph graph whose nodes hold diagram contents and whose
//! edges are either containment (root to element) or DMN requirement and
//! association links. Edges always point from the required (or source)
//! node to the dependent node.

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::common::Id;
use super::drg::{DMNDiagram, DRGElement, TextAnnotation};

/// Caller-supplied document metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Value of the `name` attribute on `definitions`
    pub name: String,
    /// Value of the `namespace` attribute on `definitions`
    pub namespace: String,
}

impl Metadata {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Content of a diagram node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeContent {
    DiagramRoot(DMNDiagram),
    DrgElement(DRGElement),
    TextAnnotation(TextAnnotation),
    /// A node owned by another definition set (e.g. a BPMN shape)
    Foreign { definition_set: String, id: Id },
}

impl NodeContent {
    pub fn element_id(&self) -> Option<&Id> {
        match self {
            NodeContent::DiagramRoot(_) => None,
            NodeContent::DrgElement(e) => Some(e.id()),
            NodeContent::TextAnnotation(t) => Some(&t.id),
            NodeContent::Foreign { id, .. } => Some(id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeContent::DiagramRoot(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssociationDirection {
    #[default]
    None,
    One,
    Both,
}

impl fmt::Display for AssociationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssociationDirection::None => write!(f, "None"),
            AssociationDirection::One => write!(f, "One"),
            AssociationDirection::Both => write!(f, "Both"),
        }
    }
}

impl FromStr for AssociationDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(AssociationDirection::None),
            "One" => Ok(AssociationDirection::One),
            "Both" => Ok(AssociationDirection::Both),
            _ => Err(format!("Unknown association direction: {}", s)),
        }
    }
}

/// Content of a diagram edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeContent {
    /// Containment from the diagram root
    Child,
    InformationRequirement,
    KnowledgeRequirement,
    AuthorityRequirement,
    Association {
        id: Id,
        direction: AssociationDirection,
    },
}

impl EdgeContent {
    pub fn is_requirement(&self) -> bool {
        matches!(
            self,
            EdgeContent::InformationRequirement
                | EdgeContent::KnowledgeRequirement
                | EdgeContent::AuthorityRequirement
        )
    }
}

/// Diagram graph with its document metadata
#[derive(Debug, Clone, Default)]
pub struct DiagramGraph {
    metadata: Metadata,
    graph: DiGraph<NodeContent, EdgeContent>,
}

impl DiagramGraph {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            graph: DiGraph::new(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn add_node(&mut self, content: NodeContent) -> NodeIndex {
        self.graph.add_node(content)
    }

    /// Add an edge from `source` to `target`
    pub fn connect(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        content: EdgeContent,
    ) -> EdgeIndex {
        self.graph.add_edge(source, target, content)
    }

    pub fn node(&self, index: NodeIndex) -> Option<&NodeContent> {
        self.graph.node_weight(index)
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut NodeContent> {
        self.graph.node_weight_mut(index)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &NodeContent)> {
        self.graph
            .node_indices()
            .filter_map(|i| self.graph.node_weight(i).map(|n| (i, n)))
    }

    /// All edges in insertion order as (source, target, content)
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &EdgeContent)> {
        self.graph.edge_indices().filter_map(|e| {
            let (source, target) = self.graph.edge_endpoints(e)?;
            self.graph.edge_weight(e).map(|w| (source, target, w))
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn edges_sorted(
        &self,
        index: NodeIndex,
        direction: Direction,
    ) -> Vec<(NodeIndex, &EdgeContent)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Incoming => e.source(),
                    Direction::Outgoing => e.target(),
                };
                (e.id(), other, e.weight())
            })
            .collect();
        edges.sort_by_key(|(id, _, _)| *id);
        edges.into_iter().map(|(_, n, w)| (n, w)).collect()
    }

    /// Incoming edges of `index` as (source, content), in insertion order
    pub fn in_edges(&self, index: NodeIndex) -> Vec<(NodeIndex, &EdgeContent)> {
        self.edges_sorted(index, Direction::Incoming)
    }

    /// Outgoing edges of `index` as (target, content), in insertion order
    pub fn out_edges(&self, index: NodeIndex) -> Vec<(NodeIndex, &EdgeContent)> {
        self.edges_sorted(index, Direction::Outgoing)
    }

    /// The first diagram root node
    pub fn find_root(&self) -> Option<NodeIndex> {
        self.nodes().find(|(_, n)| n.is_root()).map(|(i, _)| i)
    }

    pub fn node_by_element_id(&self, id: &str) -> Option<NodeIndex> {
        self.nodes()
            .find(|(_, n)| n.element_id().is_some_and(|e| e.value() == id))
            .map(|(i, _)| i)
    }

    /// Underlying petgraph graph, for traversal algorithms
    pub fn inner(&self) -> &DiGraph<NodeContent, EdgeContent> {
        &self.graph
    }
}

/// Creates the empty graph an unmarshal run populates
pub trait GraphFactory {
    fn build(&self, metadata: Metadata) -> DiagramGraph;
}

/// Factory producing a graph that already holds a diagram root node
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGraphFactory;

impl GraphFactory for DefaultGraphFactory {
    fn build(&self, metadata: Metadata) -> DiagramGraph {
        let mut graph = DiagramGraph::new(metadata);
        graph.add_node(NodeContent::DiagramRoot(DMNDiagram::default()));
        graph
    }
}
