//! Typed relation graph: storage, recommendations and relation checks.
//!
//! Nodes are people, artists and genres identified by their full name.
//! Directed edges carry one relation label; the four recognized labels
//! (`originate`, `play`, `listen`, `follow`) type their endpoints the first
//! time they are used.

mod extraction;
mod query;
mod recommend;
mod store;
mod view;

pub use extraction::{PatternExtractor, RelationExtractor};
pub use query::{ask, check_relations_satisfied};
pub use recommend::{recommend_artists, recommend_users};
pub use store::{Edge, Node, TypedGraph};
pub use view::{GraphView, Layer, ViewEdge, ViewFormat, ViewNode};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity a node stands for, inferred from the edges it takes part in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Genre,
    Artist,
    Person,
    #[default]
    Unset,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Genre => "genre",
            NodeType::Artist => "artist",
            NodeType::Person => "person",
            NodeType::Unset => "unset",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Label carried by an edge.
///
/// Parsing accepts the English lemma and the Portuguese lemma the source
/// corpora were first written with (`originar`, `tocar`, `escutar`,
/// `seguir`). Anything else is kept verbatim as [`RelationLabel::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationLabel {
    /// genre -> genre: the source genre gave rise to the target genre
    Originate,
    /// artist -> genre
    Play,
    /// person -> artist
    Listen,
    /// person -> person
    Follow,
    Other(String),
}

impl RelationLabel {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "originate" | "originar" => RelationLabel::Originate,
            "play" | "tocar" => RelationLabel::Play,
            "listen" | "escutar" => RelationLabel::Listen,
            "follow" | "seguir" => RelationLabel::Follow,
            _ => RelationLabel::Other(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RelationLabel::Originate => "originate",
            RelationLabel::Play => "play",
            RelationLabel::Listen => "listen",
            RelationLabel::Follow => "follow",
            RelationLabel::Other(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, RelationLabel::Other(_))
    }

    /// Types implied for (source, target) by an edge with this label.
    pub fn endpoint_types(&self) -> Option<(NodeType, NodeType)> {
        match self {
            RelationLabel::Originate => Some((NodeType::Genre, NodeType::Genre)),
            RelationLabel::Play => Some((NodeType::Artist, NodeType::Genre)),
            RelationLabel::Listen => Some((NodeType::Person, NodeType::Artist)),
            RelationLabel::Follow => Some((NodeType::Person, NodeType::Person)),
            RelationLabel::Other(_) => None,
        }
    }
}

impl From<&str> for RelationLabel {
    fn from(label: &str) -> Self {
        RelationLabel::parse(label)
    }
}

impl From<String> for RelationLabel {
    fn from(label: String) -> Self {
        RelationLabel::parse(&label)
    }
}

impl From<RelationLabel> for String {
    fn from(label: RelationLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single extracted statement (subject --relation--> object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// Full entity name, used directly as a node id.
    pub subject: String,
    /// Lowercase verb lemma, e.g. `listen`.
    pub relation: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}
