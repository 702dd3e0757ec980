pub mod walker;

pub use walker::{SourceFile, discover_files};

use std::path::Path;

use crate::error::{Result, TunegraphError};
use crate::graph::{RelationExtractor, Triple, TypedGraph};

/// Read the statement text at `path`.
///
/// A file is read line by line and every line is closed with `". "` so
/// that line breaks act as sentence ends. A directory contributes every
/// discovered `.txt`/`.md` file, in path order, joined the same way.
pub fn load_source(path: &Path) -> Result<String> {
    let mut text = String::new();

    if path.is_file() {
        let content = std::fs::read_to_string(path)?;
        append_lines(&mut text, &content);
    } else if path.is_dir() {
        for file in discover_files(path)? {
            let content = std::fs::read_to_string(&file.absolute_path)?;
            log::debug!("Loaded {}", file.relative_path);
            append_lines(&mut text, &content);
        }
    } else {
        return Err(TunegraphError::InvalidInput(format!(
            "source path does not exist: {}",
            path.display()
        )));
    }

    Ok(text)
}

fn append_lines(text: &mut String, content: &str) {
    for line in content.lines() {
        text.push_str(line);
        text.push_str(". ");
    }
}

/// Build a graph from triples.
///
/// All subjects are inserted first, then all objects, then the edges, each
/// in triple order. This fixes the node order recommendations report in.
pub fn build_graph(triples: &[Triple]) -> TypedGraph {
    let mut graph = TypedGraph::new();

    for t in triples {
        graph.add_node(t.subject.as_str());
    }
    for t in triples {
        graph.add_node(t.object.as_str());
    }
    for t in triples {
        graph.add_edge(&t.subject, &t.object, t.relation.as_str());
    }

    log::info!(
        "Graph built: {} nodes, {} edges from {} relations",
        graph.node_count(),
        graph.edge_count(),
        triples.len()
    );
    graph
}

/// Load `path`, extract its relations and build the graph.
pub fn build_graph_from_source<E: RelationExtractor + ?Sized>(
    path: &Path,
    extractor: &E,
) -> Result<TypedGraph> {
    let text = load_source(path)?;
    let triples = extractor.extract(&text);
    if triples.is_empty() {
        log::warn!("No relations extracted from {}", path.display());
    }
    Ok(build_graph(&triples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeType, PatternExtractor, recommend_artists};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_source_file_joins_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("texto.txt");
        fs::write(&path, "Ana follows Bia\nBia listens to Queen\n").unwrap();

        let text = load_source(&path).unwrap();
        assert_eq!(text, "Ana follows Bia. Bia listens to Queen. ");
    }

    #[test]
    fn test_load_source_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "Queen plays Rock").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "Ana listens to Queen").unwrap();

        let text = load_source(temp_dir.path()).unwrap();
        assert_eq!(text, "Ana listens to Queen. Queen plays Rock. ");
    }

    #[test]
    fn test_load_source_missing() {
        let result = load_source(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(TunegraphError::InvalidInput(_))));
    }

    #[test]
    fn test_build_graph_node_order() {
        let triples = vec![
            Triple::new("Ana", "listen", "Queen"),
            Triple::new("Rush", "play", "Prog"),
            Triple::new("Queen", "play", "Rock"),
        ];
        let graph = build_graph(&triples);
        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Ana", "Rush", "Queen", "Prog", "Rock"]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node_type("Queen"), Some(NodeType::Artist));
    }

    #[test]
    fn test_build_graph_from_source_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("texto.txt");
        fs::write(
            &path,
            "Ana listens to Metallica\nMetallica plays Thrash Metal\nSlayer plays Thrash Metal\n",
        )
        .unwrap();

        let extractor = PatternExtractor::new().unwrap();
        let graph = build_graph_from_source(&path, &extractor).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(
            recommend_artists(&graph, "Ana", false),
            Some(vec!["Slayer".to_string()])
        );
    }
}
