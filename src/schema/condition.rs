use serde::{Deserialize, Serialize};

/// What a condition checks. Only some kinds reference a named variable
/// or callback; the rest are structural checks on the graph itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionType {
    /// Calls a user-defined check by name.
    EventCall,
    BoolCall,
    IntCall,
    FloatCall,
    NameCall,
    ClassBoolVariable,
    ClassIntVariable,
    #[serde(alias = "FloatVariable")]
    ClassFloatVariable,
    ClassNameVariable,
    WasNodeVisited,
    HasSatisfiedChild,
}

impl ConditionType {
    /// Returns true if conditions of this kind carry a variable or
    /// callback name in `callback_name`.
    pub fn is_named(&self) -> bool {
        !matches!(self, Self::WasNodeVisited | Self::HasSatisfiedChild)
    }
}

/// A guard on entering a node or following an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub condition_type: ConditionType,
    pub callback_name: String,
    /// Set when the condition compares against another variable.
    #[serde(default)]
    pub other_variable_name: String,
}

impl Condition {
    pub fn new(condition_type: ConditionType, callback_name: impl Into<String>) -> Self {
        Self {
            condition_type,
            callback_name: callback_name.into(),
            other_variable_name: String::new(),
        }
    }

    /// Builder-style setter for the compared variable.
    pub fn comparing_to(mut self, other_variable_name: impl Into<String>) -> Self {
        self.other_variable_name = other_variable_name.into();
        self
    }

    /// Returns the non-empty names this condition references.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [self.callback_name.as_str(), self.other_variable_name.as_str()]
            .into_iter()
            .filter(|n| !n.is_empty())
    }
}
