use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum description length accepted by the add/edit forms
pub const DESCRIPTION_LIMIT: usize = 100;

/// Creation-ordered task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timer conditions under which task time may accrue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualGate {
    pub timer_running: bool,
    pub break_started: bool,
}

impl AccrualGate {
    /// Gate of a running focus session
    pub fn session() -> Self {
        Self {
            timer_running: true,
            break_started: false,
        }
    }

    /// Gate while the countdown is stopped
    #[cfg(test)]
    pub fn stopped() -> Self {
        Self {
            timer_running: false,
            break_started: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.timer_running && !self.break_started
    }
}

/// A tracked task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    /// Target number of focus sessions
    pub pomodoro: u32,
    /// Focus sessions completed so far (never above `pomodoro`)
    pub pomodoro_counter: u32,
    /// Created during a break: the next counter advance is swallowed
    #[serde(default)]
    pub suppress_next_alert: bool,
    pub in_progress: bool,
    pub completed: bool,
    pub alerted: bool,
    #[serde(default)]
    pub time_spent_seconds: u64,
    /// Start of the current accrual interval
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Context menu open (UI only)
    #[serde(skip)]
    pub menu_toggled: bool,
}

/// Trim and clamp a description to the input limit
pub fn normalize_description(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(DESCRIPTION_LIMIT).collect())
}

impl Task {
    pub fn new(description: String, pomodoro: u32, during_break: bool) -> Self {
        Self {
            id: TaskId::new(),
            description,
            pomodoro: pomodoro.max(1),
            pomodoro_counter: 0,
            suppress_next_alert: during_break,
            in_progress: false,
            completed: false,
            alerted: false,
            time_spent_seconds: 0,
            start_time: None,
            menu_toggled: false,
        }
    }

    /// Begin accruing time from `now`
    pub fn start_tracking(&mut self, now: DateTime<Utc>) {
        self.in_progress = true;
        self.start_time = Some(now);
    }

    /// Stop tracking, crediting the open interval if the gate allows
    pub fn stop_tracking(&mut self, gate: AccrualGate, now: DateTime<Utc>) {
        self.close_interval(gate, now);
        self.in_progress = false;
    }

    /// Credit the open interval if the gate allows, then clear it
    pub fn close_interval(&mut self, gate: AccrualGate, now: DateTime<Utc>) -> u64 {
        let credited = match self.start_time.take() {
            Some(started) if gate.is_open() => elapsed_whole_seconds(started, now),
            _ => 0,
        };
        self.time_spent_seconds += credited;
        credited
    }

    /// Credit the open interval and restart it at `now`
    pub fn flush_interval(&mut self, gate: AccrualGate, now: DateTime<Utc>) -> u64 {
        if !self.in_progress || self.start_time.is_none() || !gate.is_open() {
            return 0;
        }
        let credited = self.close_interval(gate, now);
        self.start_time = Some(now);
        credited
    }

    /// Advance the pomodoro counter by one, clamped to the target
    pub fn advance_pomodoro(&mut self) {
        if self.suppress_next_alert {
            self.suppress_next_alert = false;
            return;
        }
        self.pomodoro_counter = (self.pomodoro_counter + 1).min(self.pomodoro);
        if self.pomodoro_counter >= self.pomodoro {
            self.alerted = true;
        }
    }

    /// Change the target, never below the counter or 1
    pub fn set_pomodoro(&mut self, target: u32) {
        self.pomodoro = target.max(self.pomodoro_counter).max(1);
    }

    /// Whether every targeted session has been done
    pub fn reached_target(&self) -> bool {
        self.pomodoro_counter > 0 && self.pomodoro_counter >= self.pomodoro
    }

    /// Live time including the open interval (for display)
    pub fn time_spent_at(&self, gate: AccrualGate, now: DateTime<Utc>) -> u64 {
        match self.start_time {
            Some(started) if self.in_progress && gate.is_open() => {
                self.time_spent_seconds + elapsed_whole_seconds(started, now)
            }
            _ => self.time_spent_seconds,
        }
    }
}

fn elapsed_whole_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = end.signed_duration_since(start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}
