//! In-memory typed graph store.

use std::collections::HashMap;

use serde::Serialize;

use super::{NodeType, RelationLabel};

/// Outgoing edge record, owned by its source node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub target: String,
    pub label: RelationLabel,
}

/// A node and its outgoing edges, in first-insertion order of the targets.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub node_type: NodeType,
    pub edges: Vec<Edge>,
}

impl Node {
    fn new(id: String) -> Self {
        Self {
            id,
            node_type: NodeType::Unset,
            edges: Vec::new(),
        }
    }

    fn edge(&self, target: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.target == target)
    }
}

/// Directed graph with at most one labeled edge per ordered node pair.
///
/// Lookups on unknown ids never fail: they return `false`, `None` or an
/// empty list. Nodes iterate in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TypedGraph {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
    node_count: usize,
    edge_count: usize,
}

impl TypedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Insert an untyped node. Returns false if it already existed.
    pub fn add_node(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.order.push(id.clone());
        self.nodes.insert(id.clone(), Node::new(id));
        self.node_count += 1;
        true
    }

    /// Insert or relabel the edge `from -> to`.
    ///
    /// Both nodes must already exist, otherwise nothing happens and false is
    /// returned. Recognized labels type each endpoint that is still unset.
    pub fn add_edge(&mut self, from: &str, to: &str, label: impl Into<RelationLabel>) -> bool {
        if !self.has_node(from) || !self.has_node(to) {
            log::debug!("Ignoring edge {} -> {}: unknown endpoint", from, to);
            return false;
        }
        let label = label.into();

        if let Some((source_type, target_type)) = label.endpoint_types() {
            self.infer_type(from, source_type);
            self.infer_type(to, target_type);
        }

        let Some(node) = self.nodes.get_mut(from) else {
            return false;
        };
        match node.edges.iter_mut().find(|e| e.target == to) {
            Some(edge) => edge.label = label,
            None => {
                node.edges.push(Edge {
                    target: to.to_string(),
                    label,
                });
                self.edge_count += 1;
            }
        }
        true
    }

    fn infer_type(&mut self, id: &str, inferred: NodeType) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        match node.node_type {
            NodeType::Unset => node.node_type = inferred,
            current if current != inferred => {
                log::debug!(
                    "Keeping type {} for '{}' (edge implies {})",
                    current,
                    id,
                    inferred
                );
            }
            _ => {}
        }
    }

    /// Remove a node with its outgoing edges and every edge pointing at it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };
        self.order.retain(|n| n != id);
        self.node_count -= 1;
        self.edge_count -= node.edges.len();

        for other in self.nodes.values_mut() {
            let before = other.edges.len();
            other.edges.retain(|e| e.target != id);
            self.edge_count -= before - other.edges.len();
        }
        true
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let Some(node) = self.nodes.get_mut(from) else {
            return false;
        };
        let Some(pos) = node.edges.iter().position(|e| e.target == to) else {
            return false;
        };
        node.edges.remove(pos);
        self.edge_count -= 1;
        true
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edge_label(from, to).is_some()
    }

    /// True if the edge `from -> to` exists and carries `label`.
    pub fn has_relation(&self, from: &str, label: &RelationLabel, to: &str) -> bool {
        self.edge_label(from, to) == Some(label)
    }

    pub fn edge_label(&self, from: &str, to: &str) -> Option<&RelationLabel> {
        self.nodes
            .get(from)
            .and_then(|n| n.edge(to))
            .map(|e| &e.label)
    }

    pub fn node_type(&self, id: &str) -> Option<NodeType> {
        self.nodes.get(id).map(|n| n.node_type)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(move |id| self.nodes.get(id))
    }

    pub fn nodes_by_type(&self, node_type: NodeType) -> Vec<&str> {
        self.nodes()
            .filter(|n| n.node_type == node_type)
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Every edge as (source, target, label), sources in node order.
    pub fn labeled_edges(&self) -> Vec<(&str, &str, &RelationLabel)> {
        self.nodes()
            .flat_map(|n| {
                n.edges
                    .iter()
                    .map(move |e| (n.id.as_str(), e.target.as_str(), &e.label))
            })
            .collect()
    }

    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.labeled_edges()
            .into_iter()
            .map(|(from, to, _)| (from, to))
            .collect()
    }

    pub fn edges_by_label(&self, label: &RelationLabel) -> Vec<(&str, &str)> {
        self.labeled_edges()
            .into_iter()
            .filter(|(_, _, l)| *l == label)
            .map(|(from, to, _)| (from, to))
            .collect()
    }

    pub fn outgoing_edges(&self, id: &str) -> Vec<(&str, &str)> {
        self.outgoing(id, None)
    }

    pub fn outgoing_edges_by_label(&self, id: &str, label: &RelationLabel) -> Vec<(&str, &str)> {
        self.outgoing(id, Some(label))
    }

    pub fn incoming_edges(&self, id: &str) -> Vec<(&str, &str)> {
        self.incoming(id, None)
    }

    pub fn incoming_edges_by_label(&self, id: &str, label: &RelationLabel) -> Vec<(&str, &str)> {
        self.incoming(id, Some(label))
    }

    pub fn out_neighbors(&self, id: &str) -> Vec<&str> {
        self.outgoing(id, None).into_iter().map(|(_, to)| to).collect()
    }

    pub fn out_neighbors_by_label(&self, id: &str, label: &RelationLabel) -> Vec<&str> {
        self.outgoing(id, Some(label))
            .into_iter()
            .map(|(_, to)| to)
            .collect()
    }

    pub fn in_neighbors(&self, id: &str) -> Vec<&str> {
        self.incoming(id, None)
            .into_iter()
            .map(|(from, _)| from)
            .collect()
    }

    pub fn in_neighbors_by_label(&self, id: &str, label: &RelationLabel) -> Vec<&str> {
        self.incoming(id, Some(label))
            .into_iter()
            .map(|(from, _)| from)
            .collect()
    }

    fn outgoing(&self, id: &str, label: Option<&RelationLabel>) -> Vec<(&str, &str)> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        node.edges
            .iter()
            .filter(|e| label.map_or(true, |l| e.label == *l))
            .map(|e| (node.id.as_str(), e.target.as_str()))
            .collect()
    }

    // Incoming edges are not indexed; this scans every adjacency list.
    fn incoming(&self, id: &str, label: Option<&RelationLabel>) -> Vec<(&str, &str)> {
        self.labeled_edges()
            .into_iter()
            .filter(|(_, to, l)| *to == id && label.map_or(true, |want| *l == want))
            .map(|(from, to, _)| (from, to))
            .collect()
    }
}
