//! WASM bindings for dialogue-refs: powers a browser search panel.

use wasm_bindgen::prelude::*;

use dialogue_refs::core::graph::DialogueGraph;
use dialogue_refs::core::index::NameIndex;
use dialogue_refs::core::search::{MatchMode, ReferenceFinder, SearchCategory};

// ---------------------------------------------------------------------------
// Embedded sample dialogue: compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const TAVERN: &str = include_str!("../../tests/fixtures/tavern.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct NodeHit {
    id: u64,
    speaker: String,
    text: String,
}

#[derive(serde::Serialize)]
struct EdgeHit {
    id: u64,
    source: u64,
    target: u64,
    text: String,
}

#[derive(serde::Serialize)]
struct SearchOutput {
    category: String,
    name: String,
    nodes: Vec<NodeHit>,
    edges: Vec<EdgeHit>,
}

#[derive(serde::Serialize)]
struct CategoryInfo {
    name: &'static str,
    composite: bool,
    components: Vec<&'static str>,
}

/// A loaded dialogue ready to be searched from JavaScript.
#[wasm_bindgen]
pub struct DialogueSearch {
    graph: DialogueGraph,
    index: NameIndex,
    ignore_case: bool,
}

impl DialogueSearch {
    fn from_graph(graph: DialogueGraph) -> DialogueSearch {
        let index = NameIndex::build(&graph);
        DialogueSearch {
            graph,
            index,
            ignore_case: false,
        }
    }

    fn search(&self, name: &str, category: &str) -> Result<SearchOutput, String> {
        let category = category.parse::<SearchCategory>().map_err(|e| format!("{e}"))?;
        let mode = if self.ignore_case {
            MatchMode::IgnoreAsciiCase
        } else {
            MatchMode::Exact
        };
        let found = ReferenceFinder::new(&self.graph)
            .with_match_mode(mode)
            .find(name, category);

        let nodes = found
            .sorted_nodes()
            .into_iter()
            .filter_map(|id| self.graph.node(id))
            .map(|node| NodeHit {
                id: node.id.0,
                speaker: node.speaker.clone(),
                text: node.text.clone(),
            })
            .collect();
        let edges = found
            .sorted_edges()
            .into_iter()
            .filter_map(|id| self.graph.edge(id))
            .map(|edge| EdgeHit {
                id: edge.id.0,
                source: edge.source.0,
                target: edge.target.0,
                text: edge.text.clone(),
            })
            .collect();

        Ok(SearchOutput {
            category: category.to_string(),
            name: name.to_string(),
            nodes,
            edges,
        })
    }

    fn names(&self, category: &str) -> Result<Vec<String>, String> {
        let category = category.parse::<SearchCategory>().map_err(|e| format!("{e}"))?;
        Ok(self.index.names(category).into_iter().collect())
    }
}

#[wasm_bindgen]
impl DialogueSearch {
    /// Load a dialogue graph described as JSON.
    pub fn from_json(graph_json: &str) -> Result<DialogueSearch, JsError> {
        let graph: DialogueGraph = serde_json::from_str(graph_json)
            .map_err(|e| JsError::new(&format!("Invalid graph JSON: {e}")))?;
        Ok(Self::from_graph(graph))
    }

    /// Load a dialogue graph described as RON.
    pub fn from_ron(graph_ron: &str) -> Result<DialogueSearch, JsError> {
        let graph = DialogueGraph::parse_ron(graph_ron)
            .map_err(|e| JsError::new(&format!("Invalid graph RON: {e}")))?;
        Ok(Self::from_graph(graph))
    }

    /// The bundled tavern dialogue.
    pub fn sample() -> Result<DialogueSearch, JsError> {
        Self::from_ron(data::TAVERN)
    }

    /// Compare names ignoring ASCII case from now on.
    pub fn set_ignore_case(&mut self, ignore_case: bool) {
        self.ignore_case = ignore_case;
    }

    /// Search for a name. Returns JSON:
    /// ```json
    /// {
    ///   "category": "int_variable",
    ///   "name": "Gold",
    ///   "nodes": [{ "id": 1, "speaker": "Innkeeper", "text": "..." }],
    ///   "edges": [{ "id": 1, "source": 1, "target": 2, "text": "..." }]
    /// }
    /// ```
    pub fn find_references(&self, name: &str, category: &str) -> Result<String, JsError> {
        let output = self.search(name, category).map_err(|e| JsError::new(&e))?;
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array of the names referenced as `category`.
    pub fn referenced_names(&self, category: &str) -> Result<String, JsError> {
        let names = self.names(category).map_err(|e| JsError::new(&e))?;
        serde_json::to_string(&names)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array describing every search category.
    pub fn categories() -> String {
        let info: Vec<CategoryInfo> = SearchCategory::ALL
            .iter()
            .map(|c| CategoryInfo {
                name: c.name(),
                composite: c.is_composite(),
                components: c.components().iter().map(|leaf| leaf.name()).collect(),
            })
            .collect();
        serde_json::to_string(&info).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tavern() -> DialogueSearch {
        DialogueSearch::from_graph(DialogueGraph::parse_ron(data::TAVERN).unwrap())
    }

    #[test]
    fn search_output_is_sorted() {
        let output = tavern().search("Gold", "int_variable").unwrap();
        let node_ids: Vec<u64> = output.nodes.iter().map(|n| n.id).collect();
        assert_eq!(node_ids, vec![1, 2]);
        assert_eq!(output.edges.len(), 1);
        assert_eq!(output.edges[0].source, 1);
    }

    #[test]
    fn ignore_case_toggle() {
        let mut search = tavern();
        assert!(search.search("gold", "int_variable").unwrap().nodes.is_empty());
        search.set_ignore_case(true);
        assert_eq!(search.search("gold", "int_variable").unwrap().nodes.len(), 2);
    }

    #[test]
    fn unknown_category_is_reported() {
        assert!(tavern().search("Gold", "gold_coins").is_err());
        assert!(tavern().names("gold_coins").is_err());
    }

    #[test]
    fn names_for_category() {
        let names = tavern().names("class_text").unwrap();
        assert_eq!(names, vec!["Title".to_string()]);
    }

    #[test]
    fn categories_json() {
        let json = DialogueSearch::categories();
        assert!(json.contains("\"int_variable\""));
        assert!(json.contains("\"composite\":true"));
    }
}
