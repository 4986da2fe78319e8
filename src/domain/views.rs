use super::enums::SessionType;
use super::task::Task;
use super::timer::PomodoroTimer;

/// Filled dots up to the counter, hollow dots for the rest of the target
pub fn progress_dots(task: &Task) -> String {
    let done = task.pomodoro_counter.min(task.pomodoro) as usize;
    let rest = task.pomodoro.saturating_sub(task.pomodoro_counter) as usize;
    format!("{}{}", "●".repeat(done), "○".repeat(rest))
}

/// Leading marker for a task row
pub fn status_badge(task: &Task) -> &'static str {
    if task.completed {
        "✔"
    } else if task.in_progress {
        "▶"
    } else if task.alerted {
        "!"
    } else {
        "·"
    }
}

/// Heading of the timer pane
pub fn interval_label(timer: &PomodoroTimer) -> &'static str {
    match timer.session_type() {
        SessionType::Session => "Session",
        SessionType::Break => timer.break_kind().name(),
    }
}

/// Share of the current interval already elapsed, 0-100
pub fn elapsed_percent(timer: &PomodoroTimer) -> u16 {
    let length = timer.interval_length();
    if length == 0 {
        return 0;
    }
    let elapsed = length.saturating_sub(timer.remaining());
    ((u64::from(elapsed) * 100) / u64::from(length)).min(100) as u16
}
