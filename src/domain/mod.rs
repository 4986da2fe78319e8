pub mod clock;
pub mod enums;
pub mod error;
pub mod format;
pub mod quotes;
pub mod task;
pub mod task_store;
pub mod timer;
pub mod views;

pub use clock::{Clock, SystemClock};
pub use enums::{BreakKind, ConfirmReason, CountdownState, SessionType, SortOrder, UiMode};
pub use error::DeskError;
pub use quotes::QuoteBoard;
pub use task::{AccrualGate, Task, TaskId, DESCRIPTION_LIMIT};
pub use task_store::TaskStore;
pub use timer::{PomodoroTimer, TimerEvent, TimerLengths};
pub use views::{elapsed_percent, interval_label, progress_dots, status_badge};
