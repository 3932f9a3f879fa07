use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal task-list manager.
/// Tasks are stored in ~/.tasklist/todos.json unless --data-dir says otherwise.
#[derive(Parser)]
#[command(name = "tl", version, about = "Add, complete, filter and delete tasks")]
pub struct Cli {
    /// Directory holding the task list and log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to the TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
