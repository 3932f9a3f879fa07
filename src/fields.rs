//! Enumerations used to project and label tasks.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Which tasks are projected into the view.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    /// Whether `task` is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Next mode in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Previous mode in selector order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Filter::All => Filter::Completed,
            Filter::Pending => Filter::All,
            Filter::Completed => Filter::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status badge shown for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub fn of(task: &Task) -> Self {
        if task.completed {
            Status::Completed
        } else {
            Status::Pending
        }
    }

    /// Human label, e.g. "Pending".
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }

    /// Style class, e.g. "pending".
    pub fn class(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(completed: bool) -> Task {
        let mut t = Task::new("abc".into(), None);
        t.completed = completed;
        t
    }

    #[test]
    fn filter_matches() {
        assert!(Filter::All.matches(&task(true)));
        assert!(Filter::Pending.matches(&task(false)));
        assert!(!Filter::Pending.matches(&task(true)));
        assert!(Filter::Completed.matches(&task(true)));
    }

    #[test]
    fn filter_cycles() {
        for f in Filter::ALL {
            assert_eq!(f.next().prev(), f);
        }
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn filter_parses_from_config_strings() {
        let f: Filter = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(f, Filter::Pending);
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::of(&task(false)).label(), "Pending");
        assert_eq!(Status::of(&task(true)).class(), "completed");
    }
}
