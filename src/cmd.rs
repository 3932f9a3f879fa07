//! Command implementations for the CLI interface.
//!
//! Each command works on a loaded [`TaskStore`] and writes its report to
//! the given output, so the same code backs the binary and the tests.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::controller::{CONFIRM_DELETE_ALL, NO_TASKS_TO_DELETE};
use crate::fields::{Filter, Status};
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::Task;
use crate::view::{format_due_date, project, render_html};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (default).
    Ui {
        /// Filter selected on start; overrides the config file.
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },

    /// Add a new task.
    Add {
        /// Task description, 3 to 100 characters.
        text: String,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", "in Nw" or a weekday.
        #[arg(long, default_value = "")]
        due: String,
    },

    /// List tasks.
    List {
        /// all | pending | completed.
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },

    /// Flip a task between pending and completed.
    Toggle {
        /// Task id as shown by `list`.
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task id as shown by `list`.
        id: String,
    },

    /// Delete every task.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Export the task table as HTML.
    Export {
        /// Output file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// all | pending | completed.
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },

    /// Generate shell completion scripts.
    Completions {
        shell: Shell,
    },
}

/// Validate and add a task, printing its id.
pub fn cmd_add<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    text: &str,
    due: &str,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let task = store.add(text, due, today)?;
    writeln!(out, "Added {} (due {})", task.id, format_due_date(task.due_date))?;
    Ok(())
}

/// Print the tasks visible under `filter`.
pub fn cmd_list<S: KeyValueStore>(store: &TaskStore<S>, filter: Filter, out: &mut impl Write) -> Result<()> {
    let tasks = store.filtered(filter);
    if tasks.is_empty() {
        writeln!(out, "No tasks found")?;
        return Ok(());
    }
    print_table(&tasks, out)?;
    Ok(())
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task], out: &mut impl Write) -> std::io::Result<()> {
    let id_width = tasks.iter().map(|t| t.id.len()).max().unwrap_or(2).max(2);
    writeln!(out, "{:<id_width$} {:<10} {:<13} {}", "ID", "Status", "Due", "Task")?;
    for t in tasks {
        writeln!(
            out,
            "{:<id_width$} {:<10} {:<13} {}",
            t.id,
            Status::of(t).label(),
            format_due_date(t.due_date),
            truncate(&t.text, 60),
        )?;
    }
    Ok(())
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Flip completion on a task. Unknown ids are reported but not an error.
pub fn cmd_toggle<S: KeyValueStore>(store: &mut TaskStore<S>, id: &str, out: &mut impl Write) -> Result<()> {
    match store.toggle(id)? {
        Some(true) => writeln!(out, "Marked {id} as completed")?,
        Some(false) => writeln!(out, "Marked {id} as pending")?,
        None => writeln!(out, "No task with id {id}")?,
    }
    Ok(())
}

/// Delete one task. Unknown ids are reported but not an error.
pub fn cmd_delete<S: KeyValueStore>(store: &mut TaskStore<S>, id: &str, out: &mut impl Write) -> Result<()> {
    if store.delete(id)? {
        writeln!(out, "Deleted {id}")?;
    } else {
        writeln!(out, "No task with id {id}")?;
    }
    Ok(())
}

/// Delete every task after confirmation read from `input`, unless `yes`.
pub fn cmd_clear<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    if store.is_empty() {
        bail!(NO_TASKS_TO_DELETE);
    }
    if !yes {
        write!(out, "{CONFIRM_DELETE_ALL} (y/N): ")?;
        out.flush()?;
        let mut response = String::new();
        input.read_line(&mut response).context("failed to read confirmation")?;
        if !response.trim().to_lowercase().starts_with('y') {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }
    let removed = store.clear()?;
    writeln!(out, "Deleted {removed} task(s).")?;
    Ok(())
}

/// Render the filtered table as HTML to `output`, or to `out` if none.
pub fn cmd_export<S: KeyValueStore>(
    store: &TaskStore<S>,
    output: Option<PathBuf>,
    filter: Filter,
    out: &mut impl Write,
) -> Result<()> {
    let html = render_html(&project(store.tasks(), filter));
    match output {
        Some(path) => {
            fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        None => out.write_all(html.as_bytes())?,
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell, out: &mut impl Write) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    }

    fn store_with(texts: &[&str]) -> TaskStore<MemoryStore> {
        let (mut store, _) = TaskStore::load(MemoryStore::new()).unwrap();
        for t in texts {
            store.add(t, "2025-01-05", today()).unwrap();
        }
        store
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> (Result<()>, String) {
        let mut buf = Vec::new();
        let r = f(&mut buf);
        (r, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn add_reports_validation_message() {
        let mut store = store_with(&[]);
        let (r, _) = output(|o| cmd_add(&mut store, "Water plants", "", today(), o));
        assert_eq!(r.unwrap_err().to_string(), "Please select a due date");
        let (r, text) = output(|o| cmd_add(&mut store, "Water plants", "tomorrow", today(), o));
        r.unwrap();
        assert!(text.contains("due Jan 9, 2025"));
    }

    #[test]
    fn list_prints_rows_or_empty_state() {
        let store = store_with(&["Water plants"]);
        let (_, text) = output(|o| cmd_list(&store, Filter::All, o));
        assert!(text.contains("Pending"));
        assert!(text.contains("Jan 5, 2025"));
        assert!(text.contains("Water plants"));

        let (_, text) = output(|o| cmd_list(&store, Filter::Completed, o));
        assert_eq!(text.trim(), "No tasks found");
    }

    #[test]
    fn toggle_and_delete_tolerate_unknown_ids() {
        let mut store = store_with(&["Water plants"]);
        let id = store.tasks()[0].id.clone();
        let (r, text) = output(|o| cmd_toggle(&mut store, "nope", o));
        r.unwrap();
        assert!(text.contains("No task with id nope"));

        let (_, text) = output(|o| cmd_toggle(&mut store, &id, o));
        assert!(text.contains("completed"));
        let (_, text) = output(|o| cmd_delete(&mut store, &id, o));
        assert!(text.contains("Deleted"));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_prompts_and_respects_answer() {
        let mut store = store_with(&["one task", "two task"]);
        let (r, text) = output(|o| cmd_clear(&mut store, false, &mut "n\n".as_bytes(), o));
        r.unwrap();
        assert!(text.starts_with(CONFIRM_DELETE_ALL));
        assert_eq!(store.len(), 2);

        let (r, _) = output(|o| cmd_clear(&mut store, false, &mut "yes\n".as_bytes(), o));
        r.unwrap();
        assert!(store.is_empty());

        let (r, _) = output(|o| cmd_clear(&mut store, true, &mut "".as_bytes(), o));
        assert_eq!(r.unwrap_err().to_string(), NO_TASKS_TO_DELETE);
    }

    #[test]
    fn export_escapes_markup() {
        let store = store_with(&["<script>alert(1)</script>"]);
        let (_, html) = output(|o| cmd_export(&store, None, Filter::All, o));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.html");
        output(|o| cmd_export(&store, Some(path.clone()), Filter::All, o)).0.unwrap();
        assert!(fs::read_to_string(path).unwrap().contains("data-id"));
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
