use crate::error::StoreError;
use crate::store::TaskStore;
use crate::task::{Status, Task};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Track tasks from the command line
#[derive(Parser, Debug)]
#[command(name = "task-cli", version)]
pub struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add { description: String },
    /// List all tasks, or only those with the given status (todo, in-progress, done)
    List { status: Option<Status> },
    /// Update task description
    Update { id: u64, description: String },
    /// Delete a task
    Delete { id: u64 },
    /// Mark task as in progress
    MarkInProgress { id: u64 },
    /// Mark task as done
    MarkDone { id: u64 },
    /// Mark task as todo again
    MarkTodo { id: u64 },
    /// Manage tasks through a numbered menu
    Interactive,
}

/// Runs a single store command and reports the outcome on `out`.
///
/// Unknown ids are reported, not returned as errors. Store failures are returned.
pub fn execute(command: Commands, store: &TaskStore, out: &mut impl Write) -> anyhow::Result<()> {
    if command == Commands::Interactive {
        anyhow::bail!("interactive mode cannot be started from within a command");
    }

    let message = match apply(command, store) {
        Ok(message) => message,
        Err(StoreError::TaskNotFound(id)) => format!("Task with ID {id} not found"),
        Err(e) => return Err(e.into()),
    };
    writeln!(out, "{message}")?;
    Ok(())
}

fn apply(command: Commands, store: &TaskStore) -> Result<String, StoreError> {
    let message = match command {
        Commands::Add { description } => {
            let id = store.add(description)?;
            format!("Task added successfully (ID: {id})")
        }
        Commands::List { status } => {
            let tasks = store.list(status)?;
            // An empty store reads the same whether or not a filter was given
            if tasks.is_empty() && status.is_some() && store.list(None)?.is_empty() {
                format_tasks(&tasks, None)
            } else {
                format_tasks(&tasks, status)
            }
        }
        Commands::Update { id, description } => {
            store.update(id, description)?;
            format!("Task {id} updated successfully")
        }
        Commands::Delete { id } => {
            store.delete(id)?;
            format!("Task {id} deleted successfully")
        }
        Commands::MarkInProgress { id } => mark(store, id, Status::InProgress)?,
        Commands::MarkDone { id } => mark(store, id, Status::Done)?,
        Commands::MarkTodo { id } => mark(store, id, Status::Todo)?,
        Commands::Interactive => unreachable!("interactive mode is dispatched before `apply`"),
    };
    Ok(message)
}

fn mark(store: &TaskStore, id: u64, status: Status) -> Result<String, StoreError> {
    store.set_status(id, status)?;
    Ok(format!("Task {id} marked as '{status}' successfully"))
}

/// Formats `tasks` as a fixed-width table, or a message when there are none.
pub fn format_tasks(tasks: &[Task], filter: Option<Status>) -> String {
    if tasks.is_empty() {
        return match filter {
            Some(status) => format!("No tasks with status '{status}' found."),
            None => "No tasks found.".to_string(),
        };
    }

    let mut table = format!("{:<5} {:<12} {:<50}\n{}", "ID", "Status", "Description", "-".repeat(67));
    for task in tasks {
        table.push_str(&format!(
            "\n{:<5} {:<12} {}",
            task.id(),
            task.status(),
            task.description()
        ));
    }
    table
}
