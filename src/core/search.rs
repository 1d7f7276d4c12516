/// Reference search: which nodes and edges mention a given name.
///
/// A search is a linear scan over the graph for one `SearchCategory`.
/// Leaf categories check a single event, condition, and text-argument
/// kind; composite categories are the union of their leaves.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::graph::DialogueGraph;
use crate::schema::condition::{Condition, ConditionType};
use crate::schema::event::{Event, EventType};
use crate::schema::node::{EdgeId, NodeId};
use crate::schema::text_argument::{TextArgument, TextArgumentType};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown search category: '{0}'")]
pub struct CategoryParseError(pub String);

/// The record kinds a leaf category looks at. `None` skips that record
/// kind entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceScope {
    pub event: Option<EventType>,
    pub condition: Option<ConditionType>,
    pub text_argument: Option<TextArgumentType>,
}

impl ReferenceScope {
    const fn new(
        event: Option<EventType>,
        condition: Option<ConditionType>,
        text_argument: Option<TextArgumentType>,
    ) -> Self {
        Self {
            event,
            condition,
            text_argument,
        }
    }
}

/// What kind of name is being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SearchCategory {
    /// Plain named events.
    Event,
    /// Conditions that call a named check.
    ConditionCall,
    DialogueBool,
    DialogueInt,
    DialogueFloat,
    DialogueName,
    ClassBool,
    ClassInt,
    ClassFloat,
    ClassName,
    ClassText,
    /// `DialogueBool` and `ClassBool`.
    BoolVariable,
    /// `DialogueInt` and `ClassInt`.
    IntVariable,
    /// `DialogueFloat` and `ClassFloat`.
    FloatVariable,
    /// `DialogueName` and `ClassName`.
    NameVariable,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 15] = [
        Self::Event,
        Self::ConditionCall,
        Self::DialogueBool,
        Self::DialogueInt,
        Self::DialogueFloat,
        Self::DialogueName,
        Self::ClassBool,
        Self::ClassInt,
        Self::ClassFloat,
        Self::ClassName,
        Self::ClassText,
        Self::BoolVariable,
        Self::IntVariable,
        Self::FloatVariable,
        Self::NameVariable,
    ];

    /// Returns the snake_case name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::ConditionCall => "condition_call",
            Self::DialogueBool => "dialogue_bool",
            Self::DialogueInt => "dialogue_int",
            Self::DialogueFloat => "dialogue_float",
            Self::DialogueName => "dialogue_name",
            Self::ClassBool => "class_bool",
            Self::ClassInt => "class_int",
            Self::ClassFloat => "class_float",
            Self::ClassName => "class_name",
            Self::ClassText => "class_text",
            Self::BoolVariable => "bool_variable",
            Self::IntVariable => "int_variable",
            Self::FloatVariable => "float_variable",
            Self::NameVariable => "name_variable",
        }
    }

    pub fn is_composite(&self) -> bool {
        self.scope().is_none()
    }

    /// The leaf categories this category searches. A leaf returns itself.
    pub fn components(&self) -> &'static [SearchCategory] {
        match self {
            Self::BoolVariable => &[Self::DialogueBool, Self::ClassBool],
            Self::IntVariable => &[Self::DialogueInt, Self::ClassInt],
            Self::FloatVariable => &[Self::DialogueFloat, Self::ClassFloat],
            Self::NameVariable => &[Self::DialogueName, Self::ClassName],
            Self::Event => &[Self::Event],
            Self::ConditionCall => &[Self::ConditionCall],
            Self::DialogueBool => &[Self::DialogueBool],
            Self::DialogueInt => &[Self::DialogueInt],
            Self::DialogueFloat => &[Self::DialogueFloat],
            Self::DialogueName => &[Self::DialogueName],
            Self::ClassBool => &[Self::ClassBool],
            Self::ClassInt => &[Self::ClassInt],
            Self::ClassFloat => &[Self::ClassFloat],
            Self::ClassName => &[Self::ClassName],
            Self::ClassText => &[Self::ClassText],
        }
    }

    /// The record kinds a leaf category matches. `None` for composites.
    pub fn scope(&self) -> Option<ReferenceScope> {
        use ConditionType as C;
        use EventType as E;
        use TextArgumentType as T;

        let scope = match self {
            Self::Event => ReferenceScope::new(Some(E::Event), None, None),
            Self::ConditionCall => ReferenceScope::new(None, Some(C::EventCall), None),
            Self::DialogueBool => ReferenceScope::new(Some(E::ModifyBool), Some(C::BoolCall), None),
            Self::DialogueInt => {
                ReferenceScope::new(Some(E::ModifyInt), Some(C::IntCall), Some(T::DialogueInt))
            }
            Self::DialogueFloat => ReferenceScope::new(
                Some(E::ModifyFloat),
                Some(C::FloatCall),
                Some(T::DialogueFloat),
            ),
            Self::DialogueName => ReferenceScope::new(Some(E::ModifyName), Some(C::NameCall), None),
            Self::ClassBool => ReferenceScope::new(
                Some(E::ModifyClassBoolVariable),
                Some(C::ClassBoolVariable),
                None,
            ),
            Self::ClassInt => ReferenceScope::new(
                Some(E::ModifyClassIntVariable),
                Some(C::ClassIntVariable),
                Some(T::ClassInt),
            ),
            Self::ClassFloat => ReferenceScope::new(
                Some(E::ModifyClassFloatVariable),
                Some(C::ClassFloatVariable),
                Some(T::ClassFloat),
            ),
            Self::ClassName => ReferenceScope::new(
                Some(E::ModifyClassNameVariable),
                Some(C::ClassNameVariable),
                None,
            ),
            Self::ClassText => ReferenceScope::new(None, None, Some(T::ClassText)),
            Self::BoolVariable | Self::IntVariable | Self::FloatVariable | Self::NameVariable => {
                return None
            }
        };
        Some(scope)
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// How names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Exact,
    /// Identifier-style comparison that ignores ASCII case.
    IgnoreAsciiCase,
}

impl MatchMode {
    /// Compare a record's name against the searched name. Empty record
    /// names never match.
    pub fn matches(&self, candidate: &str, name: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        match self {
            Self::Exact => candidate == name,
            Self::IgnoreAsciiCase => candidate.eq_ignore_ascii_case(name),
        }
    }
}

/// Does `conditions` contain `name` (in either name field) with the given type?
pub fn contains_condition(
    conditions: &[Condition],
    condition_type: ConditionType,
    name: &str,
    mode: MatchMode,
) -> bool {
    conditions.iter().any(|c| {
        c.condition_type == condition_type
            && (mode.matches(&c.callback_name, name) || mode.matches(&c.other_variable_name, name))
    })
}

/// Does `events` contain `name` with the given type?
pub fn contains_event(events: &[Event], event_type: EventType, name: &str, mode: MatchMode) -> bool {
    events
        .iter()
        .any(|e| e.event_type == event_type && mode.matches(&e.event_name, name))
}

/// Does `arguments` contain `name` with the given type?
pub fn contains_text_argument(
    arguments: &[TextArgument],
    argument_type: TextArgumentType,
    name: &str,
    mode: MatchMode,
) -> bool {
    arguments
        .iter()
        .any(|a| a.argument_type == argument_type && mode.matches(&a.variable_name, name))
}

/// The nodes and edges a search found. Unordered; use `sorted_nodes` and
/// `sorted_edges` for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    pub nodes: FxHashSet<NodeId>,
    pub edges: FxHashSet<EdgeId>,
}

impl References {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(&id)
    }

    /// Union `other` into this result.
    pub fn merge(&mut self, other: References) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    pub fn sorted_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.nodes.iter().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn sorted_edges(&self) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = self.edges.iter().copied().collect();
        edges.sort_unstable();
        edges
    }
}

/// Read-only reference search over one graph.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFinder<'g> {
    graph: &'g DialogueGraph,
    mode: MatchMode,
}

impl<'g> ReferenceFinder<'g> {
    pub fn new(graph: &'g DialogueGraph) -> Self {
        Self {
            graph,
            mode: MatchMode::default(),
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Find every node and edge referencing `name` as `category`.
    ///
    /// An empty name finds nothing.
    pub fn find(&self, name: &str, category: SearchCategory) -> References {
        let mut found = References::default();
        if name.is_empty() {
            return found;
        }

        for leaf in category.components() {
            if let Some(scope) = leaf.scope() {
                self.scan(name, &scope, &mut found);
            }
        }

        tracing::debug!(
            name,
            %category,
            nodes = found.nodes.len(),
            edges = found.edges.len(),
            "reference search finished"
        );
        found
    }

    fn scan(&self, name: &str, scope: &ReferenceScope, found: &mut References) {
        for node in self.graph.nodes() {
            let mut node_matches = self.conditions_match(&node.conditions, scope, name)
                || scope
                    .event
                    .is_some_and(|ty| contains_event(&node.events, ty, name, self.mode))
                || self.text_arguments_match(&node.text_arguments, scope, name);

            for edge in self.graph.edges_from(node.id) {
                if self.conditions_match(&edge.conditions, scope, name)
                    || self.text_arguments_match(&edge.text_arguments, scope, name)
                {
                    tracing::trace!(edge = %edge.id, node = %node.id, "edge references {}", name);
                    found.edges.insert(edge.id);
                    node_matches = true;
                }
            }

            if node_matches {
                tracing::trace!(node = %node.id, "node references {}", name);
                found.nodes.insert(node.id);
            }
        }
    }

    fn conditions_match(&self, conditions: &[Condition], scope: &ReferenceScope, name: &str) -> bool {
        scope
            .condition
            .is_some_and(|ty| contains_condition(conditions, ty, name, self.mode))
    }

    fn text_arguments_match(
        &self,
        arguments: &[TextArgument],
        scope: &ReferenceScope,
        name: &str,
    ) -> bool {
        scope
            .text_argument
            .is_some_and(|ty| contains_text_argument(arguments, ty, name, self.mode))
    }
}

impl DialogueGraph {
    /// Find every node and edge referencing `name` as `category`, using
    /// exact matching.
    pub fn find_references(&self, name: &str, category: SearchCategory) -> References {
        ReferenceFinder::new(self).find(name, category)
    }
}
