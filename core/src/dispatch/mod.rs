//! Free-text instruction classification.
//!
//! A flat, priority-ordered rule table: rules are checked top to bottom and the
//! first chore with a matching rule wins. Fine for a catalogue of a few dozen
//! chores; anything larger wants a scored matcher.

mod rules;
mod task;

pub use rules::{standard_rules, Matcher, TaskRule};
pub use task::{Task, TaskKind};

use crate::error::TaskError;

#[derive(Debug, Clone)]
pub struct TaskRegistry {
    rules: Vec<TaskRule>,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new(standard_rules())
    }
}

impl TaskRegistry {
    pub fn new(rules: Vec<TaskRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TaskRule] {
        &self.rules
    }

    /// Lower-case the instruction the same way for matching and argument extraction.
    pub fn normalize(instruction: &str) -> String {
        instruction.to_lowercase()
    }

    pub fn match_kind(&self, normalized: &str) -> Option<TaskKind> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(normalized))
            .map(|rule| rule.kind)
    }

    pub fn classify(&self, instruction: &str) -> Result<Task, TaskError> {
        let normalized = Self::normalize(instruction);
        let kind = self
            .match_kind(&normalized)
            .ok_or(TaskError::NotRecognized)?;
        tracing::debug!(task = %kind, "instruction classified");
        Ok(Task::from_kind(kind, &normalized))
    }
}
