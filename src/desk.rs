use crate::domain::{
    AccrualGate, BreakKind, Clock, ConfirmReason, DeskError, PomodoroTimer, SessionType, SortOrder,
    SystemClock, Task, TaskId, TaskStore, TimerEvent, TimerLengths,
};
use crate::domain::format::{format_wall_clock, window_title};
use chrono::Local;
use std::time::Duration;
use tracing::{debug, info};

/// How long the "waiting for confirmation" toast stays up
const CONFIRMATION_TOAST_SECS: u64 = 5;

/// Sound cue requested by the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Interval reached zero
    Alarm,
    /// Countdown held for a confirmation
    Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Failure,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub icon: &'static str,
    pub duration: Duration,
    pub level: ToastLevel,
}

impl Toast {
    pub fn info(message: impl Into<String>, icon: &'static str, duration: Duration) -> Self {
        Self {
            message: message.into(),
            icon,
            duration,
            level: ToastLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: "✔",
            duration: Duration::from_secs(3),
            level: ToastLevel::Success,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: "✖",
            duration: Duration::from_secs(3),
            level: ToastLevel::Failure,
        }
    }
}

/// Side effects the application has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskEvent {
    Sound(Cue),
    Toast(Toast),
    DismissToasts,
    ConfirmationRequested(ConfirmReason),
    TaskCompleted(TaskId),
}

/// Couples the pomodoro timer with the task list
#[derive(Debug)]
pub struct Desk<C: Clock = SystemClock> {
    timer: PomodoroTimer,
    tasks: TaskStore,
    clock: C,
}

impl<C: Clock> Desk<C> {
    pub fn new(lengths: TimerLengths, tasks: TaskStore, clock: C) -> Self {
        Self {
            timer: PomodoroTimer::new(lengths),
            tasks,
            clock,
        }
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Window title for the current countdown
    pub fn title(&self) -> String {
        window_title(self.timer.session_type(), self.timer.remaining(), self.timer.has_started())
    }

    /// Local time and date from the desk clock
    pub fn wall_clock(&self) -> (String, String) {
        format_wall_clock(&self.clock.now().with_timezone(&Local))
    }

    /// Task time including the interval still open
    pub fn live_time_spent(&self, task: &Task) -> u64 {
        task.time_spent_at(self.timer.accrual_gate(), self.clock.now())
    }

    // ---- countdown controls ----

    /// Start/Pause button
    pub fn toggle_countdown(&mut self) -> Vec<DeskEvent> {
        if self.timer.has_started() {
            self.pause();
            Vec::new()
        } else {
            self.start()
        }
    }

    /// Manual start; asks first when a session would run with no task tracked
    pub fn start(&mut self) -> Vec<DeskEvent> {
        if self.timer.has_started() || self.timer.pending_confirmation().is_some() {
            return Vec::new();
        }

        if self.timer.session_type() == SessionType::Session && !self.tasks.has_in_progress() {
            info!("start requested with no task in progress");
            self.timer.await_confirmation(ConfirmReason::NoTasksOnStart);
            return vec![DeskEvent::ConfirmationRequested(ConfirmReason::NoTasksOnStart)];
        }

        self.begin_countdown();
        Vec::new()
    }

    fn begin_countdown(&mut self) {
        self.timer.start();
        self.tasks.resume_tracking(self.clock.now());
        info!(
            session = ?self.timer.session_type(),
            remaining = self.timer.remaining(),
            "countdown started"
        );
    }

    pub fn pause(&mut self) {
        if !self.timer.has_started() {
            return;
        }
        let gate = self.timer.accrual_gate();
        self.tasks.suspend_tracking(gate, self.clock.now());
        self.timer.pause();
        info!(remaining = self.timer.remaining(), "countdown paused");
    }

    /// "Start anyway" on the no-task prompt
    pub fn confirm_start(&mut self) -> bool {
        if self.timer.confirm() {
            self.tasks.resume_tracking(self.clock.now());
            info!("start confirmed without tasks");
            true
        } else {
            false
        }
    }

    /// "Cancel" on the no-task prompt
    pub fn decline_start(&mut self) -> bool {
        let declined = self.timer.decline();
        if declined {
            info!("start declined");
        }
        declined
    }

    /// Stop everything and return to a full, paused session
    pub fn reset(&mut self) {
        let gate = self.timer.accrual_gate();
        let stopped = self.tasks.stop_all_in_progress(gate, self.clock.now());
        self.timer.reset();
        info!(stopped_tasks = stopped.len(), "timer reset");
    }

    pub fn select_break(&mut self, kind: BreakKind) -> Vec<DeskEvent> {
        if !self.timer.select_break(kind) {
            return Vec::new();
        }
        let minutes = self.timer.lengths().break_length(kind) / 60;
        vec![DeskEvent::Toast(Toast::success(format!(
            "Break Length Set at {} minutes",
            minutes
        )))]
    }

    /// Apply new interval lengths; ignored while the countdown runs
    pub fn apply_lengths(&mut self, lengths: TimerLengths) -> bool {
        self.timer.set_lengths(lengths)
    }

    /// One second of countdown
    pub fn tick(&mut self) -> Vec<DeskEvent> {
        match self.timer.tick() {
            Some(TimerEvent::IntervalEnded { ended }) => self.on_interval_ended(ended),
            Some(TimerEvent::Ticked { .. }) | None => Vec::new(),
        }
    }

    fn on_interval_ended(&mut self, ended: SessionType) -> Vec<DeskEvent> {
        let now = self.clock.now();
        let mut events = vec![DeskEvent::Sound(Cue::Alarm)];

        match ended {
            SessionType::Session => {
                // Time up to now was session time
                let gate = AccrualGate::session();
                let finished = self.tasks.in_progress_ids();
                for id in &finished {
                    self.tasks.set_pomodoro_counter(*id);
                    self.tasks.toggle_in_progress_state(*id, false, gate, now);
                }
                for id in &finished {
                    if let Some(event) = self.settle_progress(*id, gate) {
                        events.push(event);
                    }
                }
                info!(credited_tasks = finished.len(), "session ended, break started");

                events.push(DeskEvent::Toast(Toast::info(
                    "Break Mode",
                    "😇",
                    Duration::from_secs(u64::from(self.timer.remaining())),
                )));
            }
            SessionType::Break => {
                if self.tasks.has_in_progress() {
                    self.tasks.resume_tracking(now);
                    info!("break ended, session resumed");
                    events.push(DeskEvent::DismissToasts);
                    events.push(DeskEvent::Toast(Toast::info(
                        "Work Mode",
                        "📚",
                        Duration::from_secs(u64::from(self.timer.current_break_length())),
                    )));
                } else {
                    self.timer.await_confirmation(ConfirmReason::NoTasksAfterBreak);
                    info!("break ended with no task in progress, waiting for confirmation");
                    events.push(DeskEvent::Sound(Cue::Notice));
                    events.push(DeskEvent::DismissToasts);
                    events.push(DeskEvent::Toast(Toast::info(
                        "Work Mode - waiting for confirmation",
                        "⏸",
                        Duration::from_secs(CONFIRMATION_TOAST_SECS),
                    )));
                    events.push(DeskEvent::ConfirmationRequested(ConfirmReason::NoTasksAfterBreak));
                }
            }
        }

        events
    }

    /// Complete a task once its counter reached the target
    fn settle_progress(&mut self, id: TaskId, gate: AccrualGate) -> Option<DeskEvent> {
        let task = self.tasks.get(id)?;
        if !task.reached_target() {
            return None;
        }
        let newly_completed = !task.completed;
        self.tasks.alert_task(id, true);
        self.tasks.toggle_in_progress_state(id, false, gate, self.clock.now());
        self.tasks.set_completed(id, true);
        if newly_completed {
            debug!(task = %id, "task reached its pomodoro target");
            Some(DeskEvent::TaskCompleted(id))
        } else {
            None
        }
    }

    // ---- task controls ----

    pub fn add_task(&mut self, description: &str, pomodoro: u32) -> Result<TaskId, DeskError> {
        let id = self
            .tasks
            .add_task(description, pomodoro, self.timer.break_started())?;
        info!(task = %id, pomodoro, "task added");
        Ok(id)
    }

    /// Apply the task settings form
    pub fn edit_task(&mut self, id: TaskId, description: &str, pomodoro: u32) -> Result<Vec<DeskEvent>, DeskError> {
        if self.tasks.get(id).is_none() {
            return Ok(Vec::new());
        }
        self.tasks.rename_task(id, description)?;
        if let Some(task) = self.tasks.get(id) {
            if task.pomodoro_counter == task.pomodoro {
                self.tasks.alert_task(id, false);
            }
        }
        self.tasks.set_pomodoro(id, pomodoro);

        let gate = self.timer.accrual_gate();
        Ok(self.settle_progress(id, gate).into_iter().collect())
    }

    /// Click on a task: track or untrack, completed tasks ignore it
    pub fn toggle_task(&mut self, id: TaskId) {
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        if task.completed {
            return;
        }
        let flag = !task.in_progress;
        self.tasks
            .toggle_in_progress_state(id, flag, self.timer.accrual_gate(), self.clock.now());
    }

    /// "Track/Untrack" from the context menu, reopening completed tasks
    pub fn track_from_menu(&mut self, id: TaskId) {
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        let flag = !task.in_progress;
        let was_completed = task.completed;
        self.tasks
            .toggle_in_progress_state(id, flag, self.timer.accrual_gate(), self.clock.now());
        self.tasks.toggle_menu(id, false);
        if was_completed {
            self.tasks.set_completed(id, false);
        }
    }

    /// "Complete" from the context menu
    pub fn toggle_completed(&mut self, id: TaskId) {
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        let completing = !task.completed;
        if completing && task.in_progress {
            self.tasks
                .toggle_in_progress_state(id, false, self.timer.accrual_gate(), self.clock.now());
        }
        self.tasks.set_completed(id, completing);
        self.tasks.toggle_menu(id, false);
    }

    pub fn open_menu(&mut self, id: TaskId) {
        let open = self.tasks.get(id).map(|t| !t.menu_toggled).unwrap_or(false);
        self.tasks.toggle_menu(id, open);
    }

    pub fn close_menus(&mut self) {
        self.tasks.close_menus();
    }

    pub fn remove_task(&mut self, id: TaskId) {
        if self.tasks.remove_task(id).is_some() {
            info!(task = %id, "task removed");
        }
    }

    pub fn remove_completed_tasks(&mut self) -> usize {
        let removed = self.tasks.remove_completed_tasks();
        info!(removed, "completed tasks removed");
        removed
    }

    pub fn remove_all_tasks(&mut self) {
        self.tasks.remove_all_tasks();
        info!("all tasks removed");
    }

    /// Move a task within the stored order
    pub fn move_task(&mut self, from: usize, to: usize) -> bool {
        match self.tasks.moved(from, to) {
            Some(reordered) => {
                self.tasks.reorder_tasks(reordered);
                true
            }
            None => false,
        }
    }

    pub fn cycle_sort_order(&mut self) -> SortOrder {
        self.tasks.cycle_sort_order()
    }

    /// Credit all open intervals up to now (before saving or quitting)
    pub fn flush_task_time(&mut self) {
        let gate = self.timer.accrual_gate();
        self.tasks.update_task_time(gate, self.clock.now());
    }
}
