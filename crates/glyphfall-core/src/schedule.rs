//! Fixed-interval scheduling.
//!
//! [`Schedule`] does not own a timer thread. The host loop asks it how long
//! it may block ([`Schedule::timeout`]) and whether a tick is due
//! ([`Schedule::fire`]), so ticks run on the host's thread, strictly one
//! after another.

use std::time::{Duration, Instant};

/// Lifecycle of a [`Schedule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScheduleState {
    /// Created but not started.
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal; a stopped schedule never fires again.
    Stopped,
}

/// Repeat a task every fixed interval until stopped.
#[derive(Debug, Clone)]
pub struct Schedule {
    period: Duration,
    next_due: Option<Instant>,
    state: ScheduleState,
}

impl Schedule {
    /// Create an idle schedule. A zero period is bumped to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
            state: ScheduleState::Idle,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == ScheduleState::Stopped
    }

    /// Start the schedule. The first tick is due immediately.
    /// Has no effect unless the schedule is idle.
    pub fn start(&mut self, now: Instant) {
        if self.state == ScheduleState::Idle {
            self.state = ScheduleState::Running;
            self.next_due = Some(now);
        }
    }

    /// Returns `true` if a tick is due at `now` and advances the deadline.
    ///
    /// When the caller has fallen a whole period behind, the next deadline
    /// is re-anchored to `now + period` instead of queueing catch-up ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.state != ScheduleState::Running {
            return false;
        }
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }

    /// How long the host may block before the next tick is due.
    /// Returns `idle` when no tick is pending.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match (self.state, self.next_due) {
            (ScheduleState::Running, Some(due)) => due.saturating_duration_since(now),
            _ => idle,
        }
    }

    pub fn pause(&mut self) {
        if self.state == ScheduleState::Running {
            self.state = ScheduleState::Paused;
        }
    }

    /// Resume a paused schedule; the next tick is due immediately.
    pub fn resume(&mut self, now: Instant) {
        if self.state == ScheduleState::Paused {
            self.state = ScheduleState::Running;
            self.next_due = Some(now);
        }
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state {
            ScheduleState::Running => self.pause(),
            ScheduleState::Paused => self.resume(now),
            ScheduleState::Idle | ScheduleState::Stopped => {}
        }
    }

    pub fn stop(&mut self) {
        self.state = ScheduleState::Stopped;
        self.next_due = None;
    }
}
