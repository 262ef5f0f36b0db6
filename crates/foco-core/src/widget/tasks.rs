//! Today's task checklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskItem {
    /// Create an open task. `text` is stored trimmed.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ValidationError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText("task text".into()));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now(),
        })
    }
}

/// Ordered list of tasks, kept in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    tasks: Vec<TaskItem>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: impl AsRef<str>) -> Result<&TaskItem, ValidationError> {
        let task = TaskItem::new(text)?;
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip a task's completion. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, ValidationError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn remove(&mut self, id: &str) -> Result<TaskItem, ValidationError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?;
        Ok(self.tasks.remove(index))
    }

    /// Task at a zero-based position, as shown to the user.
    pub fn nth(&self, index: usize) -> Option<&TaskItem> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskItem> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// "N of M done"
    pub fn summary(&self) -> String {
        format!("{} of {} done", self.completed_count(), self.len())
    }
}
