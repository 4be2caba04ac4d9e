use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{parse_date, OutputFormat};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task for a day
    Add {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Task description
        text: String,
    },

    /// List tasks for a day
    List {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle a task's completed state by ID
    Toggle {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Task ID (shown by `task list`)
        id: Uuid,
    },

    /// Remove a task by ID
    Delete {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Task ID (shown by `task list`)
        id: Uuid,
    },
}

impl TaskCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            TaskSubcommand::Add { date, text } => {
                let date = parse_date(date.as_deref())?;

                if tracker.add_task(date, text.clone()).await? {
                    println!("Added task for {}: {}", date, text);
                } else {
                    println!("Nothing added: task text cannot be blank.");
                }
                Ok(())
            }

            TaskSubcommand::List { date, format } => {
                let date = parse_date(date.as_deref())?;
                let tasks = tracker.tasks_on(date);

                if tasks.is_empty() {
                    println!("No tasks for {}", date);
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(tasks)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", date);
                        println!("{}", "-".repeat(10));
                        for task in tasks {
                            println!("{}  [{}]", task, task.id);
                        }
                        let done = tasks.iter().filter(|t| t.completed).count();
                        println!("\nTotal: {} task(s), {} done", tasks.len(), done);
                    }
                }
                Ok(())
            }

            TaskSubcommand::Toggle { date, id } => {
                let date = parse_date(date.as_deref())?;

                if tracker.toggle_task(date, *id).await? {
                    let state = tracker
                        .tasks_on(date)
                        .iter()
                        .find(|t| t.id == *id)
                        .map(|t| if t.completed { "done" } else { "not done" })
                        .unwrap_or("unknown");
                    println!("Task marked {}", state);
                } else {
                    println!("No task with that ID on {}", date);
                }
                Ok(())
            }

            TaskSubcommand::Delete { date, id } => {
                let date = parse_date(date.as_deref())?;

                if tracker.delete_task(date, *id).await? {
                    println!("Removed task from {}", date);
                } else {
                    println!("No task with that ID on {}", date);
                }
                Ok(())
            }
        }
    }
}
