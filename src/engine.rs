//! Countdown engine.
//!
//! [`Engine`] owns the [`TimerState`] and moves it through
//! `Idle → Running ⇄ Paused → Finished`. It never schedules anything itself:
//! whoever hosts it calls [`Engine::tick`] on a cadence while the mode is
//! [`Mode::Running`] (see [`crate::ticker`]).
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_rings::clock::ManualClock;
//! use countdown_rings::engine::{Engine, Mode};
//! use countdown_rings::time::DurationSpec;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new(0);
//! let mut engine = Engine::with_clock(clock.clone());
//!
//! engine.start(&DurationSpec::from_seconds(10)).unwrap();
//! clock.advance(Duration::from_secs(4));
//! engine.tick();
//! assert_eq!(engine.state().remaining_ms, 6_000);
//!
//! engine.pause_toggle();
//! assert_eq!(engine.mode(), Mode::Paused);
//! ```

use crate::clock::{Clock, SystemClock};
use crate::error::{CountdownError, Result};
use crate::time::{total_milliseconds, DurationSpec};
use tracing::{debug, trace, warn};

/// High-level mode derived from [`TimerState`].
///
/// The surrounding UI uses it to pick which controls are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No countdown; the duration form is shown.
    Idle,
    /// Counting down.
    Running,
    /// Suspended; remaining time is frozen.
    Paused,
    /// Reached zero. Only reset or cancel leave this mode.
    Finished,
}

/// The engine's mutable record.
///
/// `remaining_ms <= initial_ms` always holds, and `target_epoch_ms` is only
/// set while running and not paused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerState {
    /// True from start until zero is reached or the countdown is cancelled.
    pub running: bool,
    /// True only while running and suspended.
    pub paused: bool,
    /// Total milliseconds at the most recent start or reset.
    pub initial_ms: u64,
    /// Epoch milliseconds at which the countdown reaches zero.
    pub target_epoch_ms: Option<u64>,
    /// Last computed remaining time.
    pub remaining_ms: u64,
}

impl TimerState {
    /// Mode implied by the flags.
    pub fn mode(&self) -> Mode {
        match (self.running, self.paused) {
            (true, true) => Mode::Paused,
            (true, false) => Mode::Running,
            (false, _) if self.initial_ms > 0 => Mode::Finished,
            (false, _) => Mode::Idle,
        }
    }

    fn begin(&mut self, now_ms: u64, total_ms: u64) {
        self.initial_ms = total_ms;
        self.remaining_ms = total_ms;
        self.target_epoch_ms = Some(now_ms.saturating_add(total_ms));
        self.running = true;
        self.paused = false;
    }
}

/// What a single [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running; nothing changed.
    Ignored,
    /// Remaining time was recomputed and is still above zero.
    Counting(u64),
    /// Remaining time reached zero; the engine is now finished.
    Finished,
}

/// The countdown state machine.
#[derive(Debug, Clone)]
pub struct Engine<C: Clock = SystemClock> {
    state: TimerState,
    clock: C,
}

impl Engine<SystemClock> {
    /// Creates an idle engine on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Engine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Engine<C> {
    /// Creates an idle engine reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: TimerState::default(),
            clock,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// The clock this engine reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts a fresh countdown of `spec`.
    ///
    /// Replaces whatever countdown was in progress. A zero total is rejected
    /// with [`CountdownError::InvalidDuration`] and leaves the state untouched.
    pub fn start(&mut self, spec: &DurationSpec) -> Result<()> {
        let total_ms = total_milliseconds(spec);
        if total_ms == 0 {
            warn!(?spec, "rejected start with an empty duration");
            return Err(CountdownError::InvalidDuration { total_ms });
        }

        let now_ms = self.clock.now_ms();
        self.state.begin(now_ms, total_ms);
        debug!(total_ms, target = ?self.state.target_epoch_ms, "countdown started");
        Ok(())
    }

    /// Suspends a running countdown. No-op in any other mode.
    pub fn pause(&mut self) {
        if self.mode() != Mode::Running {
            return;
        }
        self.state.paused = true;
        self.state.target_epoch_ms = None;
        debug!(remaining_ms = self.state.remaining_ms, "countdown paused");
    }

    /// Continues a paused countdown. No-op in any other mode.
    ///
    /// The deadline moves forward by however long the pause lasted.
    pub fn resume(&mut self) {
        if self.mode() != Mode::Paused {
            return;
        }
        let now_ms = self.clock.now_ms();
        self.state.target_epoch_ms = Some(now_ms.saturating_add(self.state.remaining_ms));
        self.state.paused = false;
        debug!(remaining_ms = self.state.remaining_ms, "countdown resumed");
    }

    /// The pause control: pauses when running, resumes when paused.
    pub fn pause_toggle(&mut self) {
        match self.mode() {
            Mode::Running => self.pause(),
            Mode::Paused => self.resume(),
            Mode::Idle | Mode::Finished => {}
        }
    }

    /// Restarts the last duration from the top, whatever the current mode.
    ///
    /// No-op when no duration has been recorded.
    pub fn reset(&mut self) {
        if self.state.initial_ms == 0 {
            return;
        }
        let now_ms = self.clock.now_ms();
        let initial_ms = self.state.initial_ms;
        self.state.begin(now_ms, initial_ms);
        debug!(initial_ms, "countdown reset");
    }

    /// Clears everything and returns to [`Mode::Idle`].
    pub fn cancel(&mut self) {
        if self.mode() != Mode::Idle {
            debug!(mode = ?self.mode(), "countdown cancelled");
        }
        self.state = TimerState::default();
    }

    /// Recomputes remaining time from a single clock reading.
    ///
    /// Only acts while [`Mode::Running`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode() != Mode::Running {
            return TickOutcome::Ignored;
        }
        let Some(target_ms) = self.state.target_epoch_ms else {
            return TickOutcome::Ignored;
        };

        let now_ms = self.clock.now_ms();
        let remaining_ms = target_ms
            .saturating_sub(now_ms)
            .min(self.state.initial_ms);
        self.state.remaining_ms = remaining_ms;
        trace!(remaining_ms, "tick");

        if remaining_ms == 0 {
            self.state.running = false;
            self.state.paused = false;
            self.state.target_epoch_ms = None;
            debug!(initial_ms = self.state.initial_ms, "countdown finished");
            return TickOutcome::Finished;
        }
        TickOutcome::Counting(remaining_ms)
    }
}
