//! Task record and its persisted representation.
//!
//! Tasks are stored as a JSON array of camelCase objects:
//! `{"id", "text", "dueDate", "completed", "createdAt"}`. The due date is an
//! ISO `YYYY-MM-DD` string, or an empty string when the task has none.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Build a fresh, pending task with a newly generated id.
    ///
    /// `text` is expected to be validated and trimmed already.
    pub fn new(text: String, due_date: Option<NaiveDate>) -> Self {
        Task {
            id: generate_id(),
            text,
            due_date,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

mod due_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_pending() {
        let t = Task::new("Buy milk".into(), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert!(!t.completed);
        assert_eq!(t.text, "Buy milk");
        assert!(!t.id.is_empty());
    }

    #[test]
    fn reads_browser_era_records() {
        let json = r#"[{"id":"lx1abc","text":"Water plants","dueDate":"2025-01-05",
            "completed":true,"createdAt":"2025-01-01T09:30:00.000Z"}]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2025, 1, 5));
        assert!(tasks[0].completed);
    }

    #[test]
    fn empty_or_missing_due_date_is_none() {
        let json = r#"[{"id":"a","text":"abc","dueDate":"","completed":false,"createdAt":"2025-01-01T00:00:00Z"},
                       {"id":"b","text":"abc","completed":false,"createdAt":"2025-01-01T00:00:00Z"}]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert!(tasks.iter().all(|t| t.due_date.is_none()));
    }

    #[test]
    fn writes_camel_case_keys() {
        let t = Task::new("Read book".into(), None);
        let v: serde_json::Value = serde_json::to_value(&t).unwrap();
        assert_eq!(v["dueDate"], "");
        assert!(v.get("createdAt").is_some());
    }
}
