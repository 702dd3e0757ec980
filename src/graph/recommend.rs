//! Artist and user recommendations over the typed graph.

use std::collections::HashSet;

use super::{NodeType, RelationLabel, TypedGraph};

/// Recommend artists to `person` from the genres of the artists they listen to.
///
/// Returns `None` when `person` is absent or not typed as a person. Artists
/// the person already listens to are never recommended. With `enhance`, a
/// second pass appends artists whose `originate` edges reach a genre one
/// derivation hop away from the known genres; entries found by both passes
/// appear twice.
pub fn recommend_artists(graph: &TypedGraph, person: &str, enhance: bool) -> Option<Vec<String>> {
    if graph.node_type(person) != Some(NodeType::Person) {
        log::debug!("No artist recommendations: '{}' is not a person", person);
        return None;
    }

    let artists = graph.nodes_by_type(NodeType::Artist);
    let known_artists: HashSet<&str> = graph
        .out_neighbors_by_label(person, &RelationLabel::Listen)
        .into_iter()
        .collect();
    let known_styles: HashSet<&str> = known_artists
        .iter()
        .flat_map(|artist| graph.out_neighbors_by_label(artist, &RelationLabel::Play))
        .collect();

    let mut recommendations = Vec::new();
    for artist in &artists {
        if !known_artists.contains(artist)
            && shares_neighbor(graph, artist, &RelationLabel::Play, &known_styles)
        {
            recommendations.push(artist.to_string());
        }
    }

    if enhance {
        let mut related_styles: HashSet<&str> = HashSet::new();
        for style in &known_styles {
            related_styles.extend(graph.out_neighbors_by_label(style, &RelationLabel::Originate));
            related_styles.extend(graph.in_neighbors_by_label(style, &RelationLabel::Originate));
        }
        for artist in &artists {
            if !known_artists.contains(artist)
                && shares_neighbor(graph, artist, &RelationLabel::Originate, &related_styles)
            {
                recommendations.push(artist.to_string());
            }
        }
    }

    log::debug!(
        "{} artist recommendation(s) for '{}' (enhance={})",
        recommendations.len(),
        person,
        enhance
    );
    Some(recommendations)
}

/// Recommend people `person` does not follow yet who listen to a shared
/// artist or follow someone `person` follows.
///
/// Returns `None` when `person` is absent or not typed as a person.
pub fn recommend_users(graph: &TypedGraph, person: &str) -> Option<Vec<String>> {
    if graph.node_type(person) != Some(NodeType::Person) {
        log::debug!("No user recommendations: '{}' is not a person", person);
        return None;
    }

    let known_artists: HashSet<&str> = graph
        .out_neighbors_by_label(person, &RelationLabel::Listen)
        .into_iter()
        .collect();
    let followed: HashSet<&str> = graph
        .out_neighbors_by_label(person, &RelationLabel::Follow)
        .into_iter()
        .collect();

    let recommendations = graph
        .nodes_by_type(NodeType::Person)
        .into_iter()
        .filter(|user| *user != person && !followed.contains(user))
        .filter(|user| {
            shares_neighbor(graph, user, &RelationLabel::Listen, &known_artists)
                || shares_neighbor(graph, user, &RelationLabel::Follow, &followed)
        })
        .map(String::from)
        .collect();
    Some(recommendations)
}

fn shares_neighbor(
    graph: &TypedGraph,
    node: &str,
    label: &RelationLabel,
    targets: &HashSet<&str>,
) -> bool {
    graph
        .out_neighbors_by_label(node, label)
        .iter()
        .any(|n| targets.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ana listens to Metallica, Metallica plays Thrash, Slayer plays Thrash.
    fn base_graph() -> TypedGraph {
        let mut graph = TypedGraph::new();
        for n in ["Ana", "Metallica", "Slayer", "Thrash", "Megadeth", "Speed Metal"] {
            graph.add_node(n);
        }
        graph.add_edge("Ana", "Metallica", "listen");
        graph.add_edge("Metallica", "Thrash", "play");
        graph.add_edge("Slayer", "Thrash", "play");
        graph.add_edge("Megadeth", "Speed Metal", "play");
        graph
    }

    #[test]
    fn test_recommend_artists_base() {
        let graph = base_graph();
        let recs = recommend_artists(&graph, "Ana", false).unwrap();
        assert_eq!(recs, vec!["Slayer"]);
        assert!(!recs.contains(&"Metallica".to_string()));
    }

    #[test]
    fn test_recommend_artists_preserves_artist_order() {
        let mut graph = base_graph();
        graph.add_node("Anthrax");
        graph.add_edge("Anthrax", "Thrash", "play");
        let recs = recommend_artists(&graph, "Ana", false).unwrap();
        assert_eq!(recs, vec!["Slayer", "Anthrax"]);
    }

    #[test]
    fn test_recommend_artists_requires_person() {
        let graph = base_graph();
        assert!(recommend_artists(&graph, "Metallica", false).is_none());
        assert!(recommend_artists(&graph, "Nobody", true).is_none());
    }

    #[test]
    fn test_recommend_artists_person_without_listens() {
        let mut graph = base_graph();
        graph.add_node("Bia");
        graph.add_edge("Bia", "Ana", "follow");
        assert_eq!(recommend_artists(&graph, "Bia", true), Some(vec![]));
    }

    #[test]
    fn test_enhanced_ignores_genre_typed_originators() {
        let mut graph = base_graph();
        for n in ["Crossover", "Z"] {
            graph.add_node(n);
        }
        graph.add_edge("Thrash", "Crossover", "originate");
        // Z only has an originate edge, so it is typed as a genre, not an artist.
        graph.add_edge("Z", "Crossover", "originate");
        assert_eq!(graph.node_type("Z"), Some(NodeType::Genre));

        let recs = recommend_artists(&graph, "Ana", true).unwrap();
        assert_eq!(recs, vec!["Slayer"]);
    }

    #[test]
    fn test_enhanced_picks_artists_originating_related_styles() {
        let mut graph = base_graph();
        graph.add_node("Crossover");
        graph.add_edge("Thrash", "Crossover", "originate");
        // Megadeth is already an artist; the originate edge keeps that type.
        graph.add_edge("Megadeth", "Crossover", "originate");
        assert_eq!(graph.node_type("Megadeth"), Some(NodeType::Artist));

        assert_eq!(recommend_artists(&graph, "Ana", false).unwrap(), vec!["Slayer"]);
        assert_eq!(
            recommend_artists(&graph, "Ana", true).unwrap(),
            vec!["Slayer", "Megadeth"]
        );
    }

    #[test]
    fn test_enhanced_follows_derivation_backwards() {
        let mut graph = base_graph();
        graph.add_node("Heavy Metal");
        graph.add_edge("Heavy Metal", "Thrash", "originate");
        graph.add_edge("Megadeth", "Heavy Metal", "originate");

        let recs = recommend_artists(&graph, "Ana", true).unwrap();
        assert_eq!(recs, vec!["Slayer", "Megadeth"]);
    }

    #[test]
    fn test_enhanced_keeps_duplicates_across_passes() {
        let mut graph = base_graph();
        graph.add_node("Crossover");
        graph.add_edge("Thrash", "Crossover", "originate");
        graph.add_edge("Slayer", "Crossover", "originate");

        let recs = recommend_artists(&graph, "Ana", true).unwrap();
        assert_eq!(recs, vec!["Slayer", "Slayer"]);
    }

    fn social_graph() -> TypedGraph {
        let mut graph = TypedGraph::new();
        for n in ["Ana", "Bia", "Caio", "Duda", "Eva", "Queen", "Rush"] {
            graph.add_node(n);
        }
        graph.add_edge("Ana", "Queen", "listen");
        graph.add_edge("Ana", "Bia", "follow");
        graph.add_edge("Bia", "Queen", "listen");
        graph.add_edge("Caio", "Queen", "listen");
        graph.add_edge("Duda", "Bia", "follow");
        graph.add_edge("Eva", "Rush", "listen");
        graph
    }

    #[test]
    fn test_recommend_users() {
        let graph = social_graph();
        let recs = recommend_users(&graph, "Ana").unwrap();
        // Caio shares Queen, Duda also follows Bia; Bia is already followed.
        assert_eq!(recs, vec!["Caio", "Duda"]);
    }

    #[test]
    fn test_recommend_users_excludes_followed_and_self() {
        let graph = social_graph();
        let recs = recommend_users(&graph, "Ana").unwrap();
        assert!(!recs.contains(&"Bia".to_string()));
        assert!(!recs.contains(&"Ana".to_string()));
        assert!(!recs.contains(&"Eva".to_string()));
    }

    #[test]
    fn test_recommend_users_requires_person() {
        let graph = social_graph();
        assert!(recommend_users(&graph, "Queen").is_none());
        assert!(recommend_users(&graph, "Nobody").is_none());
    }
}
