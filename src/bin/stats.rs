use tunegraph::graph::{NodeType, RelationLabel};
use tunegraph::ingest::build_graph_from_source;
use tunegraph::{Config, PatternExtractor, TypedGraph};
use std::collections::BTreeMap;

/// Edge counts per label, recognized labels first.
fn edges_per_label(graph: &TypedGraph) -> Vec<(String, usize)> {
    let mut other: BTreeMap<String, usize> = BTreeMap::new();
    let mut known = vec![
        (RelationLabel::Originate, 0),
        (RelationLabel::Play, 0),
        (RelationLabel::Listen, 0),
        (RelationLabel::Follow, 0),
    ];

    for (_, _, label) in graph.labeled_edges() {
        match known.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => *other.entry(label.to_string()).or_insert(0) += 1,
        }
    }

    known
        .into_iter()
        .map(|(l, count)| (l.to_string(), count))
        .chain(other)
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level()),
    )
    .init();

    let extractor = PatternExtractor::with_verbs(&config.extraction.verbs)?;
    let graph = build_graph_from_source(config.source(), &extractor)?;

    println!("\n=== TuneGraph Statistics ===\n");
    println!("Source: {}\n", config.source().display());

    if graph.is_empty() {
        println!("No nodes found.");
        println!("\nCheck that the source contains statements such as \"Ana listens to Queen\".");
        return Ok(());
    }

    println!("Nodes by type:\n");
    println!("{:-<40}", "");
    println!("{:<20} {:>10}", "Type", "Count");
    println!("{:-<40}", "");
    for node_type in [NodeType::Person, NodeType::Artist, NodeType::Genre, NodeType::Unset] {
        println!("{:<20} {:>10}", node_type, graph.nodes_by_type(node_type).len());
    }
    println!("{:-<40}", "");
    println!("{:<20} {:>10}", "Total", graph.node_count());

    println!("\nEdges by label:\n");
    println!("{:-<40}", "");
    println!("{:<20} {:>10}", "Label", "Count");
    println!("{:-<40}", "");
    for (label, count) in edges_per_label(&graph) {
        println!("{:<20} {:>10}", label, count);
    }
    println!("{:-<40}", "");
    println!("{:<20} {:>10}", "Total", graph.edge_count());

    let untyped = graph.nodes_by_type(NodeType::Unset);
    if !untyped.is_empty() {
        println!("\nUntyped nodes (no recognized relation):");
        for id in untyped {
            println!("  {}", id);
        }
    }

    println!();

    Ok(())
}
