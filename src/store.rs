//! The task store: the ordered list of tasks and its persistence.
//!
//! `TaskStore` owns the list and a storage backend. Every mutation writes
//! the whole list back to the `todos` slot before returning; if that write
//! fails the in-memory list is rolled back so memory and storage never
//! disagree.

use chrono::NaiveDate;

use crate::fields::Filter;
use crate::storage::{KeyValueStore, StorageError};
use crate::task::Task;
use crate::validate::{validate_input, ValidationError};

/// Slot holding the serialized task list.
pub const TASKS_KEY: &str = "todos";
/// Slot receiving an unreadable task list before it is replaced.
pub const CORRUPT_KEY: &str = "todos.corrupt";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not save tasks: {0}")]
    Storage(#[from] StorageError),
}

/// Something worth telling the user about while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadNotice {
    /// The stored list could not be parsed; the store started empty.
    Corrupt { reason: String, backed_up: bool },
}

impl LoadNotice {
    pub fn message(&self) -> String {
        match self {
            LoadNotice::Corrupt { reason, backed_up: true } => format!(
                "Saved tasks were unreadable ({reason}); a copy was kept in '{CORRUPT_KEY}'"
            ),
            LoadNotice::Corrupt { reason, backed_up: false } => {
                format!("Saved tasks were unreadable ({reason}); starting with an empty list")
            }
        }
    }
}

pub struct TaskStore<S> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the list from `storage`. A missing slot gives an empty list; an
    /// unparsable slot is copied to [`CORRUPT_KEY`] and replaced by an empty
    /// list, reported through the returned notice.
    pub fn load(mut storage: S) -> Result<(Self, Option<LoadNotice>), StorageError> {
        let Some(raw) = storage.get(TASKS_KEY)? else {
            tracing::info!("no saved tasks, starting empty");
            return Ok((Self { tasks: Vec::new(), storage }, None));
        };

        match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
            Ok(tasks) => {
                let tasks = tasks.unwrap_or_default();
                tracing::info!(count = tasks.len(), "loaded tasks");
                Ok((Self { tasks, storage }, None))
            }
            Err(e) => {
                let backed_up = match storage.set(CORRUPT_KEY, &raw) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::error!(%err, "could not back up unreadable tasks");
                        false
                    }
                };
                tracing::warn!(error = %e, backed_up, "saved tasks unreadable, starting empty");
                let notice = LoadNotice::Corrupt {
                    reason: e.to_string(),
                    backed_up,
                };
                Ok((Self { tasks: Vec::new(), storage }, Some(notice)))
            }
        }
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks visible under `filter`, in list order.
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Validate raw input and prepend a new task.
    pub fn add(&mut self, raw_text: &str, raw_due: &str, today: NaiveDate) -> Result<&Task, StoreError> {
        let new = validate_input(raw_text, raw_due, today)?;
        self.insert(Task::new(new.text, Some(new.due_date)))
    }

    /// Prepend an already-built task.
    pub fn insert(&mut self, task: Task) -> Result<&Task, StoreError> {
        let id = task.id.clone();
        self.commit(|tasks| tasks.insert(0, task))?;
        tracing::debug!(%id, "task added");
        Ok(&self.tasks[0])
    }

    /// Flip `completed` on the task with `id`. Returns the new value, or
    /// `None` when no such task exists.
    pub fn toggle(&mut self, id: &str) -> Result<Option<bool>, StoreError> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!(%id, "toggle ignored, no such task");
            return Ok(None);
        };
        let completed = self.commit(|tasks| {
            tasks[idx].completed = !tasks[idx].completed;
            tasks[idx].completed
        })?;
        tracing::debug!(%id, completed, "task toggled");
        Ok(Some(completed))
    }

    /// Remove the task with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!(%id, "delete ignored, no such task");
            return Ok(false);
        };
        self.commit(|tasks| tasks.remove(idx))?;
        tracing::debug!(%id, "task deleted");
        Ok(true)
    }

    /// Remove every task. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.commit(|tasks| {
            let n = tasks.len();
            tasks.clear();
            n
        })?;
        tracing::debug!(removed, "all tasks deleted");
        Ok(removed)
    }

    fn commit<T>(&mut self, mutate: impl FnOnce(&mut Vec<Task>) -> T) -> Result<T, StoreError> {
        let snapshot = self.tasks.clone();
        let out = mutate(&mut self.tasks);
        if let Err(e) = self.persist() {
            tracing::error!(error = %e, "persist failed, rolling back");
            self.tasks = snapshot;
            return Err(e.into());
        }
        Ok(out)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let data = serde_json::to_string(&self.tasks)?;
        self.storage.set(TASKS_KEY, &data)
    }
}
