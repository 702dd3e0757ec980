pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod shell;

pub use config::Config;
pub use error::{TunegraphError, Result};
pub use graph::{
    NodeType, PatternExtractor, RelationExtractor, RelationLabel, Triple, TypedGraph,
    check_relations_satisfied, recommend_artists, recommend_users,
};
pub use shell::{Shell, ShellOutcome};
