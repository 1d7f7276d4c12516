use serde::{Deserialize, Serialize};

/// Where the value substituted into a text placeholder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextArgumentType {
    DisplayName,
    Gender,
    DialogueInt,
    DialogueFloat,
    ClassInt,
    ClassFloat,
    ClassText,
    Custom,
}

/// A `{placeholder}` in node or edge text, bound to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextArgument {
    pub argument_type: TextArgumentType,
    pub variable_name: String,
    /// The placeholder this argument fills, without braces.
    #[serde(default)]
    pub display_string: String,
}

impl TextArgument {
    pub fn new(argument_type: TextArgumentType, variable_name: impl Into<String>) -> Self {
        Self {
            argument_type,
            variable_name: variable_name.into(),
            display_string: String::new(),
        }
    }
}
