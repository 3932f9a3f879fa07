//! # tl - terminal task list
//!
//! ```bash
//! # Launch the interactive UI
//! tl
//!
//! # Add a task from the shell
//! tl add "Renew passport" --due "next friday"
//!
//! # Show what is left to do
//! tl list --filter pending
//! ```
//!
//! Data lives in `~/.tasklist/todos.json`; settings in
//! `~/.tasklist/config.toml`.

use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use tasklist::cli::Cli;
use tasklist::cmd::*;
use tasklist::config::{config_path, Config};
use tasklist::controller::Controller;
use tasklist::logging;
use tasklist::schedule::TimerQueue;
use tasklist::storage::FileStore;
use tasklist::store::TaskStore;
use tasklist::tui::run::run_tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        cmd_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let config_file = match cli.config {
        Some(path) => path,
        None => config_path()?,
    };
    let config = Config::load(&config_file)?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    logging::init(&data_dir, &config.log_level)?;
    tracing::debug!(data_dir = %data_dir.display(), "starting");

    let (mut store, notice) = TaskStore::load(FileStore::new(&data_dir))
        .with_context(|| format!("failed to load tasks from {}", data_dir.display()))?;
    if let Some(n) = &notice {
        eprintln!("Warning: {}", n.message());
    }

    let today = Local::now().date_naive();
    let mut out = io::stdout();
    match cli.command.unwrap_or(Commands::Ui { filter: None }) {
        Commands::Ui { filter } => {
            let controller = Controller::new(store, TimerQueue::new(), config.timing(), notice)
                .with_filter(filter.unwrap_or(config.default_filter));
            run_tui(controller)?;
        }
        Commands::Add { text, due } => cmd_add(&mut store, &text, &due, today, &mut out)?,
        Commands::List { filter } => cmd_list(&store, filter, &mut out)?,
        Commands::Toggle { id } => cmd_toggle(&mut store, &id, &mut out)?,
        Commands::Delete { id } => cmd_delete(&mut store, &id, &mut out)?,
        Commands::Clear { yes } => cmd_clear(&mut store, yes, &mut io::stdin().lock(), &mut out)?,
        Commands::Export { output, filter } => cmd_export(&store, output, filter, &mut out)?,
        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
    Ok(())
}
