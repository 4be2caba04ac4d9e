use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A to-do item for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "[{}] {}", mark, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new_starts_incomplete() {
        let task = Task::new("Buy shoes");

        assert_eq!(task.text, "Buy shoes");
        assert!(!task.completed);
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = Task::new("Buy shoes");
        let b = Task::new("Buy shoes");

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_task_display() {
        let mut task = Task::new("Buy shoes");
        assert_eq!(format!("{}", task), "[ ] Buy shoes");

        task.completed = true;
        assert_eq!(format!("{}", task), "[x] Buy shoes");
    }

    #[test]
    fn test_task_json_roundtrip() {
        let task = Task::new("Stretch");

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, task);
    }
}
