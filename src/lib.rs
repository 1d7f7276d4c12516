//! Dialogue Refs: a reference index for game dialogue graphs.
//!
//! Answers "where is this variable, event, or condition used?" for a
//! dialogue made of nodes and edges that carry typed conditions, events,
//! and text arguments.

pub mod core;
pub mod schema;

pub use crate::core::graph::{DialogueGraph, GraphError};
pub use crate::core::index::NameIndex;
pub use crate::core::search::{MatchMode, ReferenceFinder, References, SearchCategory};
