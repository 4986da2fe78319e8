//! Pomodoro countdown state machine.
//!
//! The timer owns only countdown state. It never touches tasks: interval
//! ends are reported as [`TimerEvent`]s and the desk coordinator applies the
//! task-side effects.

use super::enums::{BreakKind, ConfirmReason, CountdownState, SessionType};
use super::task::AccrualGate;

/// Interval lengths in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerLengths {
    pub pomodoro: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Default for TimerLengths {
    fn default() -> Self {
        Self {
            pomodoro: 1500,
            short_break: 300,
            long_break: 900,
        }
    }
}

impl TimerLengths {
    pub fn break_length(&self, kind: BreakKind) -> u32 {
        match kind {
            BreakKind::Short => self.short_break,
            BreakKind::Long => self.long_break,
        }
    }
}

/// Outcome of a single one-second step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown moved; `remaining` is the new value
    Ticked { remaining: u32 },
    /// The interval of type `ended` reached zero and the next one is armed
    IntervalEnded { ended: SessionType },
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    lengths: TimerLengths,
    session_type: SessionType,
    remaining: u32,
    break_kind: BreakKind,
    countdown: CountdownState,
}

impl PomodoroTimer {
    pub fn new(lengths: TimerLengths) -> Self {
        Self {
            lengths,
            session_type: SessionType::Session,
            remaining: lengths.pomodoro,
            break_kind: BreakKind::Short,
            countdown: CountdownState::Paused,
        }
    }

    pub fn lengths(&self) -> TimerLengths {
        self.lengths
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn break_kind(&self) -> BreakKind {
        self.break_kind
    }

    pub fn countdown(&self) -> CountdownState {
        self.countdown
    }

    /// The countdown is actively ticking
    pub fn has_started(&self) -> bool {
        self.countdown == CountdownState::Running
    }

    pub fn break_started(&self) -> bool {
        self.session_type == SessionType::Break
    }

    pub fn pending_confirmation(&self) -> Option<ConfirmReason> {
        match self.countdown {
            CountdownState::AwaitingConfirmation(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn accrual_gate(&self) -> AccrualGate {
        AccrualGate {
            timer_running: self.has_started(),
            break_started: self.break_started(),
        }
    }

    pub fn current_break_length(&self) -> u32 {
        self.lengths.break_length(self.break_kind)
    }

    /// Length of the interval currently shown
    pub fn interval_length(&self) -> u32 {
        match self.session_type {
            SessionType::Session => self.lengths.pomodoro,
            SessionType::Break => self.current_break_length(),
        }
    }

    pub fn start(&mut self) {
        self.countdown = CountdownState::Running;
    }

    pub fn pause(&mut self) {
        self.countdown = CountdownState::Paused;
    }

    /// Hold the countdown until the user answers a prompt
    pub fn await_confirmation(&mut self, reason: ConfirmReason) {
        self.countdown = CountdownState::AwaitingConfirmation(reason);
    }

    /// Accept a pending prompt; returns whether the countdown started
    pub fn confirm(&mut self) -> bool {
        if self.pending_confirmation().is_some() {
            self.countdown = CountdownState::Running;
            true
        } else {
            false
        }
    }

    /// Decline a pending prompt, leaving the countdown paused
    pub fn decline(&mut self) -> bool {
        if self.pending_confirmation().is_some() {
            self.countdown = CountdownState::Paused;
            true
        } else {
            false
        }
    }

    /// Back to a paused, full-length session
    pub fn reset(&mut self) {
        self.countdown = CountdownState::Paused;
        self.session_type = SessionType::Session;
        self.remaining = self.lengths.pomodoro;
    }

    /// Pick the break that follows sessions; ignored while running or on a break
    pub fn select_break(&mut self, kind: BreakKind) -> bool {
        if self.has_started() || self.break_started() {
            return false;
        }
        self.break_kind = kind;
        true
    }

    /// Replace the interval lengths; ignored while the countdown runs
    pub fn set_lengths(&mut self, lengths: TimerLengths) -> bool {
        if self.has_started() {
            return false;
        }
        self.lengths = lengths;
        match self.session_type {
            SessionType::Session => self.remaining = lengths.pomodoro,
            SessionType::Break => {
                self.remaining = self.remaining.min(self.current_break_length());
            }
        }
        true
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.has_started() {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Some(TimerEvent::Ticked {
                remaining: self.remaining,
            });
        }

        let ended = self.session_type;
        match ended {
            SessionType::Session => {
                self.session_type = SessionType::Break;
                self.remaining = self.current_break_length();
            }
            SessionType::Break => {
                self.session_type = SessionType::Session;
                self.remaining = self.lengths.pomodoro;
            }
        }
        Some(TimerEvent::IntervalEnded { ended })
    }
}
