//! Task data structure and related functionality.
//!
//! This module defines the `Task` record consumed by every renderer: a
//! hierarchical identifier, a title, free-text parent references and optional
//! duration, status, labels and auxiliary fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::Status;
use crate::hierarchy;

/// Field name used to classify tasks (e.g. `Type = epic`).
pub const TYPE_FIELD: &str = "Type";

/// A single row of the work-breakdown structure.
///
/// Depth is derived from `id` and never stored. Parent references are kept as the
/// raw comma-separated string and parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub parents: String,
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub number: u64,
}

#[cfg(test)]
impl Task {
    /// Create a task with the given id, title and parent list.
    pub fn new(id: impl Into<String>, title: impl Into<String>, parents: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            parents: parents.into(),
            ..Default::default()
        }
    }

    /// Builder-style status setter.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder-style duration setter.
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Builder-style label setter.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Builder-style auxiliary field setter.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl Task {
    /// Hierarchy depth derived from the identifier.
    pub fn depth(&self) -> usize {
        hierarchy::depth(&self.id)
    }

    /// Parsed parent references; `[""]` when the task has no parents.
    pub fn parent_refs(&self) -> Vec<String> {
        hierarchy::parse_parents(&self.parents)
    }

    pub fn status_kind(&self) -> Status {
        Status::parse(&self.status)
    }

    pub fn is_completed(&self) -> bool {
        hierarchy::is_completed(&self.status)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Label membership OR `Type` field equality.
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.has_label(filter) || self.field(TYPE_FIELD) == Some(filter)
    }

    pub fn is_epic(&self) -> bool {
        self.matches_filter("epic")
    }

    pub fn is_bug(&self) -> bool {
        self.has_label("bug")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_derived_values() {
        let task = Task::new("1.1.2", "Wire up", "1.1.1, 1.2").with_status("Completed");
        assert_eq!(task.depth(), 3);
        assert_eq!(task.parent_refs(), vec!["1.1.1", "1.2"]);
        assert!(task.is_completed());
        assert_eq!(task.status_kind(), Status::Unknown);
    }

    #[test]
    fn test_task_without_parents() {
        let task = Task::new("1", "Root", "");
        assert_eq!(task.parent_refs(), vec![""]);
    }

    #[test]
    fn test_filter_matches_label_or_type() {
        let labelled = Task::new("1", "A", "").with_label("backend");
        let typed = Task::new("2", "B", "").with_field(TYPE_FIELD, "backend");
        let other = Task::new("3", "C", "").with_field("Area", "backend");
        assert!(labelled.matches_filter("backend"));
        assert!(typed.matches_filter("backend"));
        assert!(!other.matches_filter("backend"));
    }

    #[test]
    fn test_epic_and_bug_classification() {
        assert!(Task::new("1", "E", "").with_label("epic").is_epic());
        assert!(Task::new("1", "E", "").with_field("Type", "epic").is_epic());
        assert!(!Task::new("1", "E", "").with_field("Type", "Epic").is_epic());
        assert!(Task::new("1", "B", "").with_label("bug").is_bug());
        assert!(!Task::new("1", "B", "").with_field("Type", "bug").is_bug());
    }
}
