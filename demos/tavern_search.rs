/// Tavern Search example: what a search panel shows for a small dialogue.
///
/// Lists every referenced name, then runs a few searches the way an editor
/// would when the user picks a variable.
///
/// Run with: cargo run --example tavern_search

use dialogue_refs::core::graph::DialogueGraph;
use dialogue_refs::core::index::NameIndex;
use dialogue_refs::core::search::{MatchMode, ReferenceFinder, SearchCategory};

fn main() {
    let graph = DialogueGraph::load_from_ron(std::path::Path::new("tests/fixtures/tavern.ron"))
        .expect("Failed to load tavern dialogue");

    println!(
        "Tavern dialogue: {} nodes, {} edges\n",
        graph.node_count(),
        graph.edge_count()
    );

    // --- What can be searched for ---
    let index = NameIndex::build(&graph);
    for category in SearchCategory::ALL.into_iter().filter(|c| !c.is_composite()) {
        let names = index.names(category);
        if !names.is_empty() {
            let names: Vec<String> = names.into_iter().collect();
            println!("{:>16}: {}", category, names.join(", "));
        }
    }
    println!();

    // --- A few searches ---
    let finder = ReferenceFinder::new(&graph);
    search(&graph, &finder, "Gold", SearchCategory::IntVariable);
    search(&graph, &finder, "LastTopic", SearchCategory::NameVariable);
    search(&graph, &finder, "Dragon", SearchCategory::BoolVariable);

    let relaxed = finder.with_match_mode(MatchMode::IgnoreAsciiCase);
    search(&graph, &relaxed, "metinnkeeper", SearchCategory::BoolVariable);
}

fn search(graph: &DialogueGraph, finder: &ReferenceFinder<'_>, name: &str, category: SearchCategory) {
    let found = finder.find(name, category);
    println!("--- '{}' as {} ({:?}) ---", name, category, finder.match_mode());

    if found.is_empty() {
        println!("  (no references)");
    }
    for id in found.sorted_nodes() {
        if let Some(node) = graph.node(id) {
            println!("  {} {}: \"{}\"", id, node.speaker, node.text);
        }
    }
    for id in found.sorted_edges() {
        if let Some(edge) = graph.edge(id) {
            println!("  {} {} -> {}: \"{}\"", id, edge.source, edge.target, edge.text);
        }
    }
    println!();
}
