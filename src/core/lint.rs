/// Graph lint checks: unnamed references and unreachable nodes.

use std::path::Path;

use crate::core::graph::DialogueGraph;
use crate::schema::condition::Condition;
use crate::schema::text_argument::{TextArgument, TextArgumentType};

/// Warnings and load failures collected over one or more graph files.
#[derive(Debug, Default)]
pub struct LintReport {
    pub files: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and lint one RON graph. Load failures are recorded as errors.
    pub fn check_file(&mut self, path: &Path) -> bool {
        self.files += 1;
        match DialogueGraph::load_from_ron(path) {
            Ok(graph) => {
                for warning in lint_graph(&graph) {
                    self.warnings.push(format!("{}: {}", path.display(), warning));
                }
                true
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), "graph failed to load");
                self.errors.push(format!("{}: {}", path.display(), e));
                false
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Process exit status: warnings alone do not fail a run.
    pub fn exit_code(&self) -> i32 {
        if self.errors.is_empty() {
            0
        } else {
            1
        }
    }
}

/// Lint a loaded graph. The first node is the entry point and may have no
/// incoming edges.
pub fn lint_graph(graph: &DialogueGraph) -> Vec<String> {
    let mut warnings = Vec::new();

    for node in graph.nodes() {
        check_conditions(&node.id.to_string(), &node.conditions, &mut warnings);

        for (i, event) in node.events.iter().enumerate() {
            if event.event_name.is_empty() {
                warnings.push(format!(
                    "{} event {} ({:?}) has no name",
                    node.id, i, event.event_type
                ));
            }
        }

        check_text_arguments(&node.id.to_string(), &node.text_arguments, &mut warnings);
    }

    for edge in graph.edges() {
        check_conditions(&edge.id.to_string(), &edge.conditions, &mut warnings);
        check_text_arguments(&edge.id.to_string(), &edge.text_arguments, &mut warnings);
    }

    for node in graph.nodes().iter().skip(1) {
        if !graph.has_incoming(node.id) {
            warnings.push(format!("{} is unreachable (no incoming edges)", node.id));
        }
    }

    warnings
}

fn check_conditions(owner: &str, conditions: &[Condition], warnings: &mut Vec<String>) {
    for (i, condition) in conditions.iter().enumerate() {
        if condition.condition_type.is_named() && condition.callback_name.is_empty() {
            warnings.push(format!(
                "{} condition {} ({:?}) has no name",
                owner, i, condition.condition_type
            ));
        }
    }
}

fn check_text_arguments(owner: &str, arguments: &[TextArgument], warnings: &mut Vec<String>) {
    for argument in arguments {
        if needs_variable(argument.argument_type) && argument.variable_name.is_empty() {
            warnings.push(format!(
                "{} text argument '{{{}}}' ({:?}) has no variable",
                owner, argument.display_string, argument.argument_type
            ));
        }
    }
}

fn needs_variable(argument_type: TextArgumentType) -> bool {
    !matches!(
        argument_type,
        TextArgumentType::DisplayName | TextArgumentType::Gender | TextArgumentType::Custom
    )
}
