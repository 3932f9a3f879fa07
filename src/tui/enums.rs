//! Enumerations for TUI state management.

/// Which screen the terminal user interface is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    TaskList,
    Help,
}
