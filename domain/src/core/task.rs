//! Task value object

use serde::{Deserialize, Serialize};

/// A task submitted to the roundtable (Value Object)
///
/// Holds the raw input text, which may be a short query or a full
/// document. Classification into one or the other happens in the
/// analysis subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    content: String,
}

impl Task {
    /// Create a new task
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Task cannot be empty");
        Self { content }
    }

    /// Try to create a new task, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the task content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Task {
    fn from(s: &str) -> Self {
        Task::new(s)
    }
}

impl From<String> for Task {
    fn from(s: String) -> Self {
        Task::new(s)
    }
}
