pub mod condition;
pub mod event;
pub mod node;
pub mod text_argument;
