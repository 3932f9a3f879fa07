//! # tasklist
//!
//! A terminal task-list manager: add tasks with a due date, mark them
//! completed, filter the list and delete tasks one by one or all at once.
//!
//! The list is owned by a [`store::TaskStore`] and written in full to a
//! key-value slot after every change, so what is on disk always matches
//! what is on screen. Surfaces (the TUI and the CLI) talk to the store
//! through [`controller::Controller`] or the `cmd` functions; neither
//! keeps any state of its own beyond cursor and selection.

pub mod cli;
pub mod cmd;
pub mod config;
pub mod controller;
pub mod fields;
pub mod id;
pub mod input;
pub mod logging;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod task;
pub mod validate;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod run;
    pub mod utils;
}
