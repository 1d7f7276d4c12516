use serde::{Deserialize, Serialize};
use std::fmt;

use super::condition::Condition;
use super::event::Event;
use super::text_argument::TextArgument;

/// Newtype wrapper for node IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Newtype wrapper for edge IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}

/// A line of dialogue. Its conditions gate entry, its events fire on
/// entry, and its text arguments fill placeholders in `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub text_arguments: Vec<TextArgument>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            speaker: String::new(),
            text: String::new(),
            conditions: Vec::new(),
            events: Vec::new(),
            text_arguments: Vec::new(),
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self.text = text.into();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_text_argument(mut self, argument: TextArgument) -> Self {
        self.text_arguments.push(argument);
        self
    }
}

/// A directed transition from `source` (its owner) to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Player-facing option text, if any.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub text_arguments: Vec<TextArgument>,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            text: String::new(),
            conditions: Vec::new(),
            text_arguments: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_text_argument(mut self, argument: TextArgument) -> Self {
        self.text_arguments.push(argument);
        self
    }
}
