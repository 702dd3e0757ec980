//! Yes/no relation questions answered against the graph.

use super::{RelationExtractor, RelationLabel, Triple, TypedGraph};

/// True iff every triple matches an existing edge with the same label.
///
/// Stops at the first unmatched triple. An empty slice is vacuously true.
pub fn check_relations_satisfied(graph: &TypedGraph, triples: &[Triple]) -> bool {
    triples.iter().all(|t| {
        graph.has_relation(&t.subject, &RelationLabel::parse(&t.relation), &t.object)
    })
}

/// Extract triples from `question` and check them against the graph.
pub fn ask<E: RelationExtractor + ?Sized>(graph: &TypedGraph, extractor: &E, question: &str) -> bool {
    let triples = extractor.extract(question);
    if triples.is_empty() {
        log::warn!("No relation found in question: {}", question.trim());
    }
    check_relations_satisfied(graph, &triples)
}
