use serde::{Deserialize, Serialize};

/// Kind of interval the timer is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    Session,
    Break,
}

impl SessionType {
    /// Icon used in the window title
    pub fn icon(&self) -> &'static str {
        match self {
            SessionType::Session => "⏱",
            SessionType::Break => "☕",
        }
    }
}

/// Which break length follows a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    Short,
    Long,
}

impl BreakKind {
    pub fn name(&self) -> &'static str {
        match self {
            BreakKind::Short => "Short Break",
            BreakKind::Long => "Long Break",
        }
    }
}

/// Why the countdown is held waiting for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmReason {
    /// Start pressed during a session with no task in progress
    NoTasksOnStart,
    /// A break ended and no task is in progress
    NoTasksAfterBreak,
}

/// Whether the one-second countdown is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Paused,
    AwaitingConfirmation(ConfirmReason),
}

impl CountdownState {
    pub fn label(&self) -> &'static str {
        match self {
            CountdownState::Running => "RUNNING",
            CountdownState::Paused => "PAUSED",
            CountdownState::AwaitingConfirmation(_) => "WAITING",
        }
    }
}

/// Presentation order of the task list (never reorders the stored list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Default,
    CompletedFirst,
    CompletedLast,
}

impl SortOrder {
    /// Next order in the toggle cycle
    pub fn next(self) -> Self {
        match self {
            SortOrder::Default => SortOrder::CompletedFirst,
            SortOrder::CompletedFirst => SortOrder::CompletedLast,
            SortOrder::CompletedLast => SortOrder::Default,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::CompletedFirst => "completed first",
            SortOrder::CompletedLast => "completed last",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    ContextMenu,
    ConfirmStart,
    ConfirmDelete,
    ConfirmClearAll,
    Settings,
}
