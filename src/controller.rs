//! UI-independent action handling.
//!
//! `Controller` is what a rendering surface talks to. It owns the store,
//! the form contents, the error region and the cosmetic state (attention
//! cues, rows fading out before removal). Surfaces call the `TaskActions`
//! handlers, drive deferred work through [`Controller::tick`], and draw
//! from [`Controller::view`].

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::fields::Filter;
use crate::input::InputField;
use crate::schedule::{Deferred, Scheduler};
use crate::storage::KeyValueStore;
use crate::store::{LoadNotice, StoreError, TaskStore};
use crate::validate::Field;
use crate::view::{project, ListView};

pub const NO_TASKS_TO_DELETE: &str = "No tasks to delete";
pub const CONFIRM_DELETE_ALL: &str = "Are you sure you want to delete all tasks?";

/// The handlers a surface dispatches user actions to.
pub trait TaskActions {
    /// Validate the form and add a task from it.
    fn on_submit(&mut self);
    fn on_toggle(&mut self, id: &str);
    /// Fade the row out, then remove the task once the delay elapses.
    fn on_delete(&mut self, id: &str);
    fn on_filter_change(&mut self, filter: Filter);
    /// Ask to delete everything; see [`TaskActions::on_confirm`].
    fn on_delete_all(&mut self);
    /// Answer the pending confirmation, if any.
    fn on_confirm(&mut self, accepted: bool);
}

/// Cosmetic delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub delete_delay: Duration,
    pub cue: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            delete_delay: Duration::from_millis(300),
            cue: Duration::from_millis(400),
        }
    }
}

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Text,
    DueDate,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Text => Focus::DueDate,
            Focus::DueDate => Focus::List,
            Focus::List => Focus::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Text => Focus::List,
            Focus::DueDate => Focus::Text,
            Focus::List => Focus::DueDate,
        }
    }
}

/// The new-task form.
#[derive(Debug, Clone)]
pub struct Form {
    pub text: InputField,
    pub due: InputField,
    pub focus: Focus,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            text: InputField::new(),
            due: InputField::new(),
            focus: Focus::Text,
        }
    }
}

impl Form {
    /// The input under focus, if focus is in the form.
    pub fn focused_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Text => Some(&mut self.text),
            Focus::DueDate => Some(&mut self.due),
            Focus::List => None,
        }
    }

    fn reset(&mut self) {
        self.text.clear();
        self.due.clear();
        self.focus = Focus::Text;
    }
}

/// A question awaiting a yes/no from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    DeleteAll,
}

impl Confirmation {
    pub fn prompt(self) -> &'static str {
        match self {
            Confirmation::DeleteAll => CONFIRM_DELETE_ALL,
        }
    }
}

pub struct Controller<S, D> {
    store: TaskStore<S>,
    scheduler: D,
    timing: Timing,
    filter: Filter,
    pub form: Form,
    error: Option<String>,
    cues: HashSet<Field>,
    fading: HashSet<String>,
    pending: Option<Confirmation>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: KeyValueStore, D: Scheduler> Controller<S, D> {
    /// Wrap a loaded store. A load notice, if any, starts out in the error
    /// region.
    pub fn new(store: TaskStore<S>, scheduler: D, timing: Timing, notice: Option<LoadNotice>) -> Self {
        Self {
            store,
            scheduler,
            timing,
            filter: Filter::default(),
            form: Form::default(),
            error: notice.map(|n| n.message()),
            cues: HashSet::new(),
            fading: HashSet::new(),
            pending: None,
            today: local_today,
        }
    }

    /// Start with a specific filter selected.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Override the source of "today" used for relative due dates.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Current contents of the error region.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `field` currently carries the attention cue.
    pub fn has_cue(&self, field: Field) -> bool {
        self.cues.contains(&field)
    }

    /// Whether the row for `id` is fading out ahead of removal.
    pub fn is_fading(&self, id: &str) -> bool {
        self.fading.contains(id)
    }

    pub fn pending_confirmation(&self) -> Option<Confirmation> {
        self.pending
    }

    /// The visible projection under the current filter.
    pub fn view(&self) -> ListView {
        project(self.store.tasks(), self.filter)
    }

    /// Apply every deferred action that has come due.
    pub fn tick(&mut self) {
        for action in self.scheduler.due() {
            match action {
                Deferred::ClearCue(field) => {
                    self.cues.remove(&field);
                }
                Deferred::Remove(id) => {
                    self.fading.remove(&id);
                    if let Err(e) = self.store.delete(&id) {
                        self.show_error(e.to_string());
                    }
                }
            }
        }
    }

    fn show_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn cue(&mut self, field: Field) {
        self.cues.insert(field);
        self.scheduler.schedule(self.timing.cue, Deferred::ClearCue(field));
    }
}

impl<S: KeyValueStore, D: Scheduler> TaskActions for Controller<S, D> {
    fn on_submit(&mut self) {
        let today = (self.today)();
        let result = self
            .store
            .add(&self.form.text.value, &self.form.due.value, today)
            .map(|_| ());
        match result {
            Ok(_) => {
                self.form.reset();
                self.hide_error();
            }
            Err(StoreError::Validation(e)) => {
                tracing::debug!(error = %e, "task rejected");
                self.show_error(e.to_string());
                self.cue(e.field());
            }
            Err(e @ StoreError::Storage(_)) => self.show_error(e.to_string()),
        }
    }

    fn on_toggle(&mut self, id: &str) {
        if let Err(e) = self.store.toggle(id) {
            self.show_error(e.to_string());
        }
    }

    fn on_delete(&mut self, id: &str) {
        if self.store.get(id).is_none() || !self.fading.insert(id.to_string()) {
            return;
        }
        self.scheduler
            .schedule(self.timing.delete_delay, Deferred::Remove(id.to_string()));
    }

    fn on_filter_change(&mut self, filter: Filter) {
        self.filter = filter;
    }

    fn on_delete_all(&mut self) {
        if self.store.is_empty() {
            self.show_error(NO_TASKS_TO_DELETE.to_string());
            return;
        }
        self.pending = Some(Confirmation::DeleteAll);
    }

    fn on_confirm(&mut self, accepted: bool) {
        let Some(Confirmation::DeleteAll) = self.pending.take() else {
            return;
        };
        if !accepted {
            return;
        }
        match self.store.clear() {
            Ok(_) => {
                self.fading.clear();
                self.hide_error();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }
}
