//! Periodic driver for the countdown engine.
//!
//! The engine exposes [`Engine::tick`](crate::engine::Engine::tick) but never
//! schedules it. A [`Ticker`] does the scheduling with bubbletea-rs `tick`
//! commands: every accepted [`TickMsg`] is answered with the command for the
//! next one, forming a single chain while the countdown runs.
//!
//! # Stopping
//!
//! A tick already handed to the runtime cannot be recalled. Instead every
//! message carries the ticker's `tag` at the time it was scheduled, and
//! [`Ticker::stop`] and [`Ticker::start`] bump the tag. Late messages from a
//! previous chain then fail [`Ticker::accepts`] and are dropped, so nothing
//! fires after a stop and restarting never doubles the cadence.
//!
//! ```rust
//! use countdown_rings::ticker::Ticker;
//! use std::time::Duration;
//!
//! let mut ticker = Ticker::new(Duration::from_millis(200));
//! let _cmd = ticker.start();
//! assert!(ticker.active());
//!
//! ticker.stop();
//! assert!(!ticker.active());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Default cadence between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

// Internal ID management for ticker instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered on every tick.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The ticker that scheduled this message.
    pub id: i64,
    // Chain generation; stale chains are rejected.
    tag: i64,
}

/// Schedules ticks at a fixed interval.
#[derive(Debug, Clone)]
pub struct Ticker {
    /// Time between ticks.
    pub interval: Duration,
    id: i64,
    tag: i64,
    active: bool,
}

impl Ticker {
    /// Creates a stopped ticker.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            id: next_id(),
            tag: 0,
            active: false,
        }
    }

    /// Unique identifier of this ticker.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether a chain is currently live.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Begins a new chain, invalidating any previous one.
    pub fn start(&mut self) -> Cmd {
        self.tag += 1;
        self.active = true;
        self.schedule()
    }

    /// Stops the chain. Ticks already in flight will be rejected.
    pub fn stop(&mut self) {
        if self.active {
            self.tag += 1;
            self.active = false;
        }
    }

    /// Whether `msg` belongs to the live chain of this ticker.
    pub fn accepts(&self, msg: &TickMsg) -> bool {
        self.active && msg.id == self.id && msg.tag == self.tag
    }

    /// Command for the next tick of the live chain.
    pub fn schedule(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    #[cfg(test)]
    pub(crate) fn live_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
