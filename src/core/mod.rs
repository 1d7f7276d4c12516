pub mod graph;
pub mod index;
pub mod lint;
pub mod search;
