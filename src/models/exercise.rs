use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single set within an exercise.
///
/// Reps and weight are kept as the user typed them rather than parsed into
/// numbers, so a half-filled set survives an edit session unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub reps: String,
    pub weight: String,
}

impl ExerciseSet {
    pub fn new(reps: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            reps: reps.into(),
            weight: weight.into(),
        }
    }
}

/// An exercise logged for a single day.
///
/// The id is assigned at creation and is the handle for every targeted
/// mutation; list position is display order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sets: Vec::new(),
        }
    }

    pub fn with_sets(mut self, sets: Vec<ExerciseSet>) -> Self {
        self.sets = sets;
        self
    }

    /// An exercise is ready to save once it has a name and at least one set.
    pub fn is_savable(&self) -> bool {
        !self.name.trim().is_empty() && !self.sets.is_empty()
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for (i, set) in self.sets.iter().enumerate() {
            writeln!(f, "  Set {}: {} reps x {} kg", i + 1, set.reps, set.weight)?;
        }
        Ok(())
    }
}
