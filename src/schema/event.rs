use serde::{Deserialize, Serialize};

/// The effect an event has when its node is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A plain named notification for the game to handle.
    Event,
    ModifyBool,
    ModifyInt,
    ModifyFloat,
    ModifyName,
    ModifyClassBoolVariable,
    ModifyClassIntVariable,
    ModifyClassFloatVariable,
    ModifyClassNameVariable,
}

impl EventType {
    /// Returns true if this event writes to a variable rather than
    /// firing a notification.
    pub fn is_modifier(&self) -> bool {
        !matches!(self, Self::Event)
    }
}

/// Something that happens when a node is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    pub event_name: String,
}

impl Event {
    pub fn new(event_type: EventType, event_name: impl Into<String>) -> Self {
        Self {
            event_type,
            event_name: event_name.into(),
        }
    }
}
