/// Name index: every name a graph references, grouped by category.
///
/// Used to offer completions in a search box before any search runs.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::graph::DialogueGraph;
use crate::core::search::{ReferenceScope, SearchCategory};
use crate::schema::condition::Condition;
use crate::schema::event::Event;
use crate::schema::text_argument::TextArgument;

/// Referenced names per leaf category, sorted.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: BTreeMap<SearchCategory, BTreeSet<String>>,
}

impl NameIndex {
    pub fn build(graph: &DialogueGraph) -> Self {
        let mut names: BTreeMap<SearchCategory, BTreeSet<String>> = BTreeMap::new();

        for category in SearchCategory::ALL {
            let Some(scope) = category.scope() else {
                continue;
            };
            let mut found = BTreeSet::new();
            for node in graph.nodes() {
                collect(&scope, &node.conditions, &node.events, &node.text_arguments, &mut found);
            }
            for edge in graph.edges() {
                collect(&scope, &edge.conditions, &[], &edge.text_arguments, &mut found);
            }
            if !found.is_empty() {
                names.insert(category, found);
            }
        }

        tracing::debug!(categories = names.len(), "built name index");
        Self { names }
    }

    /// Names referenced as `category`. Composite categories union their
    /// leaves.
    pub fn names(&self, category: SearchCategory) -> BTreeSet<String> {
        category
            .components()
            .iter()
            .filter_map(|leaf| self.names.get(leaf))
            .flat_map(|set| set.iter().cloned())
            .collect()
    }

    /// The leaf categories `name` is referenced as, in declaration order.
    pub fn categories_of(&self, name: &str) -> Vec<SearchCategory> {
        self.names
            .iter()
            .filter(|(_, set)| set.contains(name))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Number of distinct (category, name) pairs.
    pub fn len(&self) -> usize {
        self.names.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn collect(
    scope: &ReferenceScope,
    conditions: &[Condition],
    events: &[Event],
    arguments: &[TextArgument],
    found: &mut BTreeSet<String>,
) {
    if let Some(ty) = scope.condition {
        for condition in conditions.iter().filter(|c| c.condition_type == ty) {
            found.extend(condition.names().map(str::to_string));
        }
    }
    if let Some(ty) = scope.event {
        for event in events.iter().filter(|e| e.event_type == ty) {
            if !event.event_name.is_empty() {
                found.insert(event.event_name.clone());
            }
        }
    }
    if let Some(ty) = scope.text_argument {
        for argument in arguments.iter().filter(|a| a.argument_type == ty) {
            if !argument.variable_name.is_empty() {
                found.insert(argument.variable_name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::condition::ConditionType;
    use crate::schema::event::EventType;
    use crate::schema::node::{Edge, EdgeId, Node, NodeId};
    use crate::schema::text_argument::TextArgumentType;

    fn graph() -> DialogueGraph {
        DialogueGraph::new(
            vec![
                Node::new(NodeId(0))
                    .with_event(Event::new(EventType::ModifyInt, "Gold"))
                    .with_event(Event::new(EventType::ModifyClassIntVariable, "Level"))
                    .with_event(Event::new(EventType::Event, "")),
                Node::new(NodeId(1))
                    .with_text_argument(TextArgument::new(TextArgumentType::ClassText, "Title")),
            ],
            vec![Edge::new(EdgeId(0), NodeId(0), NodeId(1)).with_condition(
                Condition::new(ConditionType::IntCall, "Gold").comparing_to("Price"),
            )],
        )
        .unwrap()
    }

    #[test]
    fn names_per_leaf() {
        let index = NameIndex::build(&graph());
        let dialogue_int: Vec<String> = index.names(SearchCategory::DialogueInt).into_iter().collect();
        assert_eq!(dialogue_int, vec!["Gold".to_string(), "Price".to_string()]);
        assert!(index.names(SearchCategory::ClassText).contains("Title"));
        assert!(index.names(SearchCategory::Event).is_empty());
    }

    #[test]
    fn composite_names_union_leaves() {
        let index = NameIndex::build(&graph());
        let ints = index.names(SearchCategory::IntVariable);
        assert_eq!(ints.len(), 3);
        assert!(ints.contains("Level"));
    }

    #[test]
    fn categories_of_name() {
        let index = NameIndex::build(&graph());
        assert_eq!(index.categories_of("Gold"), vec![SearchCategory::DialogueInt]);
        assert_eq!(index.categories_of("Level"), vec![SearchCategory::ClassInt]);
        assert!(index.categories_of("Nobody").is_empty());
    }

    #[test]
    fn counts() {
        let index = NameIndex::build(&graph());
        assert_eq!(index.len(), 4);
        assert!(NameIndex::build(&DialogueGraph::empty()).is_empty());
    }
}
