/// Dialogue graph: an immutable arena of nodes and edges.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::node::{Edge, EdgeId, Node, NodeId};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),
    #[error("duplicate edge id: {0}")]
    DuplicateEdge(EdgeId),
    #[error("{edge} starts at unknown {node}")]
    UnknownSource { edge: EdgeId, node: NodeId },
    #[error("{edge} points to unknown {node}")]
    UnknownTarget { edge: EdgeId, node: NodeId },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// On-disk shape of a graph, before ids are checked and indexed.
#[derive(Debug, Deserialize)]
#[serde(rename = "DialogueGraph")]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// A validated dialogue graph.
///
/// Nodes and edges keep the order they were given in. Every edge is owned
/// by its `source` node; `edges_from` yields a node's edges in edge order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DialogueGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    node_slots: FxHashMap<NodeId, usize>,
    #[serde(skip)]
    edge_slots: FxHashMap<EdgeId, usize>,
    /// Edge slots owned by each node slot.
    #[serde(skip)]
    children: Vec<Vec<usize>>,
}

impl<'de> Deserialize<'de> for DialogueGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawGraph::deserialize(deserializer)?;
        Self::new(raw.nodes, raw.edges).map_err(serde::de::Error::custom)
    }
}

impl DialogueGraph {
    /// Build a graph, checking that ids are unique and that every edge
    /// connects two existing nodes.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<DialogueGraph, GraphError> {
        let mut node_slots = FxHashMap::default();
        for (slot, node) in nodes.iter().enumerate() {
            if node_slots.insert(node.id, slot).is_some() {
                return Err(GraphError::DuplicateNode(node.id));
            }
        }

        let mut edge_slots = FxHashMap::default();
        let mut children = vec![Vec::new(); nodes.len()];
        for (slot, edge) in edges.iter().enumerate() {
            if edge_slots.insert(edge.id, slot).is_some() {
                return Err(GraphError::DuplicateEdge(edge.id));
            }
            let Some(&owner) = node_slots.get(&edge.source) else {
                return Err(GraphError::UnknownSource {
                    edge: edge.id,
                    node: edge.source,
                });
            };
            if !node_slots.contains_key(&edge.target) {
                return Err(GraphError::UnknownTarget {
                    edge: edge.id,
                    node: edge.target,
                });
            }
            children[owner].push(slot);
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "built dialogue graph"
        );

        Ok(DialogueGraph {
            nodes,
            edges,
            node_slots,
            edge_slots,
            children,
        })
    }

    pub fn empty() -> DialogueGraph {
        DialogueGraph::default()
    }

    /// Load a graph from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<DialogueGraph, GraphError> {
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading dialogue graph");
        Self::parse_ron(&contents)
    }

    /// Parse a graph from a RON string.
    pub fn parse_ron(input: &str) -> Result<DialogueGraph, GraphError> {
        let raw: RawGraph = ron::from_str(input)?;
        Self::new(raw.nodes, raw.edges)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_slots.get(&id).map(|&slot| &self.edges[slot])
    }

    /// The transitions owned by `id`. Empty for unknown nodes.
    pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        let slots: &[usize] = match self.node_slots.get(&id) {
            Some(&slot) => &self.children[slot],
            None => &[],
        };
        slots.iter().map(move |&slot| &self.edges[slot])
    }

    /// Returns true if any edge leads into `id`.
    pub fn has_incoming(&self, id: NodeId) -> bool {
        self.edges.iter().any(|edge| edge.target == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
