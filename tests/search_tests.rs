/// Reference search integration tests against the tavern fixture.

use dialogue_refs::core::graph::DialogueGraph;
use dialogue_refs::core::index::NameIndex;
use dialogue_refs::core::search::{MatchMode, ReferenceFinder, References, SearchCategory};
use dialogue_refs::schema::condition::{Condition, ConditionType};
use dialogue_refs::schema::event::{Event, EventType};
use dialogue_refs::schema::node::{Edge, EdgeId, Node, NodeId};

fn tavern() -> DialogueGraph {
    DialogueGraph::load_from_ron(std::path::Path::new("tests/fixtures/tavern.ron")).unwrap()
}

fn ids(found: &References) -> (Vec<u64>, Vec<u64>) {
    (
        found.sorted_nodes().into_iter().map(|n| n.0).collect(),
        found.sorted_edges().into_iter().map(|e| e.0).collect(),
    )
}

#[test]
fn tavern_fixture_loads() {
    let graph = tavern();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    let from_innkeeper: Vec<EdgeId> = graph.edges_from(NodeId(1)).map(|e| e.id).collect();
    assert_eq!(from_innkeeper, vec![EdgeId(1), EdgeId(2)]);
}

#[test]
fn bool_event_on_node() {
    let found = tavern().find_references("MetInnkeeper", SearchCategory::BoolVariable);
    assert_eq!(ids(&found), (vec![0], vec![]));
}

#[test]
fn int_condition_on_edge() {
    let found = tavern().find_references("Score", SearchCategory::IntVariable);
    assert_eq!(ids(&found), (vec![1], vec![2]));
}

#[test]
fn class_int_across_events_conditions_and_arguments() {
    let found = tavern().find_references("Gold", SearchCategory::IntVariable);
    assert_eq!(ids(&found), (vec![1, 2], vec![1]));
}

#[test]
fn other_variable_name_and_text_arguments_collapse() {
    let graph = tavern();
    for category in [
        SearchCategory::DialogueInt,
        SearchCategory::ClassInt,
        SearchCategory::IntVariable,
    ] {
        let found = graph.find_references("RoomPrice", category);
        assert_eq!(ids(&found), (vec![1], vec![1]), "category {}", category);
    }
}

#[test]
fn class_float_legacy_spelling() {
    let graph = tavern();
    let found = graph.find_references("Tipsiness", SearchCategory::FloatVariable);
    assert_eq!(ids(&found), (vec![4], vec![]));
    let found = graph.find_references("Tolerance", SearchCategory::ClassFloat);
    assert_eq!(ids(&found), (vec![4], vec![]));
    let found = graph.find_references("Reputation", SearchCategory::FloatVariable);
    assert_eq!(ids(&found), (vec![3], vec![]));
}

#[test]
fn name_variable_on_node_and_edge() {
    let found = tavern().find_references("LastTopic", SearchCategory::NameVariable);
    assert_eq!(ids(&found), (vec![0, 4], vec![3]));
}

#[test]
fn events_and_condition_calls() {
    let graph = tavern();
    let found = graph.find_references("PlayGreeting", SearchCategory::Event);
    assert_eq!(ids(&found), (vec![0], vec![]));
    let found = graph.find_references("CanOrderDrink", SearchCategory::ConditionCall);
    assert_eq!(ids(&found), (vec![0], vec![3]));
    assert!(graph
        .find_references("CanOrderDrink", SearchCategory::Event)
        .is_empty());
}

#[test]
fn class_text_argument() {
    let found = tavern().find_references("Title", SearchCategory::ClassText);
    assert_eq!(ids(&found), (vec![0], vec![]));
}

#[test]
fn class_bool_is_not_dialogue_bool() {
    let graph = tavern();
    assert_eq!(
        ids(&graph.find_references("HasRoom", SearchCategory::BoolVariable)),
        (vec![2], vec![])
    );
    assert!(graph
        .find_references("HasRoom", SearchCategory::DialogueBool)
        .is_empty());
}

#[test]
fn absent_name_is_empty_for_every_category() {
    let graph = tavern();
    for category in SearchCategory::ALL {
        assert!(graph.find_references("Dragon", category).is_empty());
        assert!(graph.find_references("", category).is_empty());
    }
}

#[test]
fn composites_equal_union_of_leaves() {
    let graph = tavern();
    let index = NameIndex::build(&graph);
    for category in SearchCategory::ALL.into_iter().filter(|c| c.is_composite()) {
        for name in index.names(category) {
            let mut union = References::default();
            for leaf in category.components() {
                union.merge(graph.find_references(&name, *leaf));
            }
            assert_eq!(graph.find_references(&name, category), union);
        }
    }
}

#[test]
fn matched_edges_bring_their_owner() {
    let graph = tavern();
    let index = NameIndex::build(&graph);
    for category in SearchCategory::ALL {
        for name in index.names(category) {
            let found = graph.find_references(&name, category);
            for edge_id in &found.edges {
                let edge = graph.edge(*edge_id).unwrap();
                assert!(found.contains_node(edge.source));
            }
        }
    }
}

#[test]
fn indexed_names_are_always_found() {
    let graph = tavern();
    let index = NameIndex::build(&graph);
    assert!(!index.is_empty());
    for category in SearchCategory::ALL {
        for name in index.names(category) {
            assert!(
                !graph.find_references(&name, category).is_empty(),
                "'{}' indexed as {} but not found",
                name,
                category
            );
        }
    }
    assert_eq!(
        index.categories_of("Gold"),
        vec![SearchCategory::ClassInt]
    );
}

#[test]
fn ignore_case_mode() {
    let graph = tavern();
    assert!(graph
        .find_references("gold", SearchCategory::IntVariable)
        .is_empty());
    let found = ReferenceFinder::new(&graph)
        .with_match_mode(MatchMode::IgnoreAsciiCase)
        .find("gold", SearchCategory::IntVariable);
    assert_eq!(ids(&found), (vec![1, 2], vec![1]));
}

#[test]
fn repeated_queries_are_identical() {
    let graph = tavern();
    let finder = ReferenceFinder::new(&graph);
    for category in SearchCategory::ALL {
        assert_eq!(finder.find("Gold", category), finder.find("Gold", category));
    }
}

#[test]
fn builder_graph_scenario() {
    // Node B owns edge E, which checks the int "Score".
    let graph = DialogueGraph::new(
        vec![
            Node::new(NodeId(1)).with_event(Event::new(EventType::ModifyBool, "Flag1")),
            Node::new(NodeId(2)),
            Node::new(NodeId(3)),
        ],
        vec![Edge::new(EdgeId(7), NodeId(2), NodeId(3))
            .with_condition(Condition::new(ConditionType::IntCall, "Score"))],
    )
    .unwrap();

    let found = graph.find_references("Flag1", SearchCategory::BoolVariable);
    assert_eq!(ids(&found), (vec![1], vec![]));

    let found = graph.find_references("Score", SearchCategory::IntVariable);
    assert_eq!(ids(&found), (vec![2], vec![7]));
}

#[test]
fn graph_from_json() {
    let graph: DialogueGraph = serde_json::from_str(
        r#"{
            "nodes": [
                {"id": 0, "events": [{"event_type": "ModifyName", "event_name": "Weather"}]},
                {"id": 1}
            ],
            "edges": [
                {"id": 0, "source": 0, "target": 1, "conditions": [
                    {"condition_type": "ClassNameVariable", "callback_name": "Season", "other_variable_name": "Weather"}
                ]}
            ]
        }"#,
    )
    .unwrap();
    let found = graph.find_references("Weather", SearchCategory::NameVariable);
    assert_eq!(ids(&found), (vec![0], vec![0]));

    let dangling = serde_json::from_str::<DialogueGraph>(
        r#"{"nodes": [], "edges": [{"id": 0, "source": 0, "target": 0}]}"#,
    );
    assert!(dangling.is_err());
}
