//! Command-line surface for the task list core.
//!
//! # Responsibility
//! - Forward user intents (add/edit/toggle/rm/ls) into task store operations.
//! - Render the filtered list and heading; rendering stays out of core.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use todolist_core::db::open_db;
use todolist_core::{
    default_log_level, init_logging, Filter, SqliteSnapshotRepository, TaskId, TaskStore,
};

#[derive(Parser)]
#[command(name = "todolist", version, about = "Manage a persistent to-do list")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "todolist.db")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging stays off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task.
    Add {
        /// Task name; must not be blank.
        name: String,
    },
    /// Rename an existing task.
    Edit {
        /// Task id as printed by `add` or `ls`.
        id: String,
        /// New task name; must not be blank.
        name: String,
    },
    /// Toggle a task between active and completed.
    Toggle {
        /// Task id as printed by `add` or `ls`.
        id: String,
    },
    /// Delete a task.
    Rm {
        /// Task id as printed by `add` or `ls`.
        id: String,
    },
    /// List tasks under a filter.
    Ls {
        /// One of: All, Active, Complète (aliases: complete, completed).
        #[arg(long, default_value = "All")]
        filter: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let mut store = TaskStore::open(repo)?;

    match cli.command {
        Command::Add { name } => {
            let id = store.add_task(&name)?;
            println!("added {id}");
        }
        Command::Edit { id, name } => {
            store.edit_task(&TaskId::from_raw(id), &name)?;
        }
        Command::Toggle { id } => {
            store.toggle_task(&TaskId::from_raw(id));
        }
        Command::Rm { id } => {
            store.delete_task(&TaskId::from_raw(id));
        }
        Command::Ls { filter } => {
            let filter = Filter::parse(&filter).ok_or_else(|| {
                let known: Vec<_> = Filter::ALL.iter().map(|f| f.label()).collect();
                format!(
                    "unknown filter `{filter}`; expected one of: {}",
                    known.join(", ")
                )
            })?;
            store.set_filter(filter);

            println!("{}", store.heading());
            for task in store.filtered_tasks() {
                let mark = if task.completed { "x" } else { " " };
                println!("[{mark}] {}  {}", task.id, task.name);
            }
        }
    }

    Ok(())
}
