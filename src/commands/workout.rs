use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{parse_date, OutputFormat};
use crate::models::{Exercise, ExerciseSet};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Log an exercise for a day
    Add {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Exercise name
        name: String,

        /// Set as REPSxWEIGHT, e.g. 5x100 (can be repeated)
        #[arg(long = "set", value_name = "SET")]
        sets: Vec<String>,
    },

    /// List exercises for a day
    List {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove an exercise by ID
    Delete {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Exercise ID (shown by `workout list`)
        id: Uuid,
    },
}

impl WorkoutCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            WorkoutSubcommand::Add { date, name, sets } => {
                let date = parse_date(date.as_deref())?;

                let mut parsed_sets = Vec::with_capacity(sets.len());
                for set in sets {
                    parsed_sets.push(parse_set(set)?);
                }

                let exercise = Exercise::new(name).with_sets(parsed_sets);
                if tracker.add_exercise(date, exercise.clone()).await? {
                    println!("Logged for {}:", date);
                    println!("{}", exercise);
                } else {
                    println!("Nothing logged: an exercise needs a name and at least one set.");
                }
                Ok(())
            }

            WorkoutSubcommand::List { date, format } => {
                let date = parse_date(date.as_deref())?;
                let exercises = tracker.workouts_on(date);

                if exercises.is_empty() {
                    println!("No exercises logged for {}", date);
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(exercises)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", date);
                        println!("{}", "-".repeat(10));
                        for exercise in exercises {
                            println!("{}  [{}]", exercise.name, exercise.id);
                            for (i, set) in exercise.sets.iter().enumerate() {
                                println!("  Set {}: {} reps x {} kg", i + 1, set.reps, set.weight);
                            }
                        }
                        println!("\nTotal: {} exercise(s)", exercises.len());
                    }
                }
                Ok(())
            }

            WorkoutSubcommand::Delete { date, id } => {
                let date = parse_date(date.as_deref())?;

                if tracker.delete_exercise(date, *id).await? {
                    println!("Removed exercise from {}", date);
                } else {
                    println!("No exercise with that ID on {}", date);
                }
                Ok(())
            }
        }
    }
}

/// Parse a REPSxWEIGHT argument like `5x100` into its two halves, kept as
/// strings exactly as typed.
fn parse_set(s: &str) -> Result<ExerciseSet, String> {
    match s.split_once(['x', 'X']) {
        Some((reps, weight)) => Ok(ExerciseSet::new(reps.trim(), weight.trim())),
        None => Err(format!("Invalid set '{}'. Use REPSxWEIGHT, e.g. 5x100.", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        let set = parse_set("5x100").unwrap();
        assert_eq!(set.reps, "5");
        assert_eq!(set.weight, "100");

        let spaced = parse_set("12 X 22.5").unwrap();
        assert_eq!(spaced.reps, "12");
        assert_eq!(spaced.weight, "22.5");
    }

    #[test]
    fn test_parse_set_invalid() {
        assert!(parse_set("five reps").is_err());
    }
}
