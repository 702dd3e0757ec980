//! Read-only layer views for presentation (Graphviz DOT or JSON).

use std::collections::HashSet;
use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{NodeType, RelationLabel, TypedGraph};
use crate::error::{Result, TunegraphError};

/// Slice of the graph to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// Every node and edge
    All,
    /// Artists, genres and `play` edges
    ArtistsGenres,
    /// Artists, persons and `listen` edges
    ArtistsUsers,
    /// Genres and `originate` edges
    Genres,
    /// Persons and `follow` edges
    Users,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::All,
        Layer::ArtistsGenres,
        Layer::ArtistsUsers,
        Layer::Genres,
        Layer::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::All => "all",
            Layer::ArtistsGenres => "artists-genres",
            Layer::ArtistsUsers => "artists-users",
            Layer::Genres => "genres",
            Layer::Users => "users",
        }
    }

    /// Node types shown, in display order; `None` means every node.
    fn node_types(&self) -> Option<&'static [NodeType]> {
        match self {
            Layer::All => None,
            Layer::ArtistsGenres => Some(&[NodeType::Artist, NodeType::Genre]),
            Layer::ArtistsUsers => Some(&[NodeType::Artist, NodeType::Person]),
            Layer::Genres => Some(&[NodeType::Genre]),
            Layer::Users => Some(&[NodeType::Person]),
        }
    }

    fn edge_label(&self) -> Option<RelationLabel> {
        match self {
            Layer::All => None,
            Layer::ArtistsGenres => Some(RelationLabel::Play),
            Layer::ArtistsUsers => Some(RelationLabel::Listen),
            Layer::Genres => Some(RelationLabel::Originate),
            Layer::Users => Some(RelationLabel::Follow),
        }
    }
}

impl FromStr for Layer {
    type Err = TunegraphError;

    /// Accepts the layer name or its menu number (1-5).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "1" => Ok(Layer::All),
            "artists-genres" | "2" => Ok(Layer::ArtistsGenres),
            "artists-users" | "3" => Ok(Layer::ArtistsUsers),
            "genres" | "4" => Ok(Layer::Genres),
            "users" | "5" => Ok(Layer::Users),
            other => Err(TunegraphError::InvalidInput(format!("unknown layer: {}", other))),
        }
    }
}

/// Output format of a rendered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    #[default]
    Dot,
    Json,
}

impl FromStr for ViewFormat {
    type Err = TunegraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dot" => Ok(ViewFormat::Dot),
            "json" => Ok(ViewFormat::Json),
            other => Err(TunegraphError::InvalidInput(format!("unknown view format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    pub id: String,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEdge {
    pub source: String,
    pub target: String,
    pub label: RelationLabel,
}

/// Nodes and edges of one layer. Edges whose endpoints fall outside the
/// layer's node set are left out.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub layer: Layer,
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl GraphView {
    pub fn of(graph: &TypedGraph, layer: Layer) -> Self {
        let nodes: Vec<ViewNode> = match layer.node_types() {
            None => graph
                .nodes()
                .map(|n| ViewNode {
                    id: n.id.clone(),
                    node_type: n.node_type,
                })
                .collect(),
            Some(types) => types
                .iter()
                .flat_map(|t| {
                    graph.nodes_by_type(*t).into_iter().map(move |id| ViewNode {
                        id: id.to_string(),
                        node_type: *t,
                    })
                })
                .collect(),
        };

        let shown: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let wanted = layer.edge_label();
        let edges = graph
            .labeled_edges()
            .into_iter()
            .filter(|(_, _, label)| wanted.as_ref().map_or(true, |w| *label == w))
            .filter(|(from, to, _)| shown.contains(from) && shown.contains(to))
            .map(|(from, to, label)| ViewEdge {
                source: from.to_string(),
                target: to.to_string(),
                label: label.clone(),
            })
            .collect();

        Self { layer, nodes, edges }
    }

    pub fn render(&self, format: ViewFormat) -> Result<String> {
        match format {
            ViewFormat::Dot => Ok(self.to_dot()),
            ViewFormat::Json => self.to_json(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", self.layer.as_str());
        for node in &self.nodes {
            let _ = writeln!(
                out,
                "    \"{}\" [color=\"{}\", label=\"{}\"];",
                escape(&node.id),
                node_color(node.node_type),
                escape(&node.id)
            );
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [color=\"{}\", label=\"{}\"];",
                escape(&edge.source),
                escape(&edge.target),
                edge_color(&edge.label),
                escape(edge.label.as_str())
            );
        }
        out.push_str("}\n");
        out
    }
}

fn node_color(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Genre => "red",
        NodeType::Artist => "green",
        NodeType::Person => "blue",
        NodeType::Unset => "black",
    }
}

fn edge_color(label: &RelationLabel) -> &'static str {
    match label {
        RelationLabel::Originate => "purple",
        RelationLabel::Play => "orange",
        RelationLabel::Follow => "gray",
        RelationLabel::Listen | RelationLabel::Other(_) => "black",
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
