#![warn(missing_docs)]

//! # countdown-rings
//!
//! A terminal countdown timer built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//! The user enters days, hours, minutes and seconds; once started, every
//! time unit is drawn as a ring that depletes as its value falls.
//!
//! ## Overview
//!
//! The crate splits into three layers:
//!
//! - **Time arithmetic** ([`time`]): converting between a [`DurationSpec`]
//!   and milliseconds, and coercing raw form input.
//! - **Countdown engine** ([`engine`]): the state machine behind
//!   start, pause, resume, reset, cancel and tick. It anchors to an absolute
//!   target on a [`Clock`] so tick jitter never accumulates.
//! - **Render adapter** ([`render`]): a pure mapping from engine state to a
//!   [`Presentation`] of four rings.
//!
//! The [`widget`] module wires these to a [`ticker::Ticker`], the duration
//! [`form`], the ring [`gauge`]s and the [`help`] line.
//!
//! ## Driving the engine
//!
//! ```rust
//! use countdown_rings::prelude::*;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new(0);
//! let mut engine = Engine::with_clock(clock.clone());
//! engine.start(&DurationSpec::new(0, 0, 1, 30)).unwrap();
//!
//! clock.advance(Duration::from_secs(45));
//! engine.tick();
//!
//! let view = present(engine.state());
//! assert_eq!(view.unit(Unit::Minutes).value, 0);
//! assert_eq!(view.unit(Unit::Seconds).value, 45);
//! assert!(!view.unit(Unit::Days).visible);
//! ```
//!
//! ## Key Bindings
//!
//! Components use the key binding system from the `key` module:
//!
//! ```rust
//! use countdown_rings::key::{Binding, KeyMap};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! struct MyKeyMap {
//!     pause: Binding,
//!     quit: Binding,
//! }
//!
//! impl KeyMap for MyKeyMap {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.pause, &self.quit]
//!     }
//!
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.pause], vec![&self.quit]]
//!     }
//! }
//!
//! let keys = MyKeyMap {
//!     pause: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "pause"),
//!     quit: Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
//!         .with_help("ctrl+c", "quit"),
//! };
//! assert_eq!(keys.short_help().len(), 2);
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod gauge;
pub mod help;
pub mod key;
pub mod logging;
pub mod render;
pub mod ticker;
pub mod time;
pub mod widget;

use bubbletea_rs::Cmd;

/// Components that take keyboard focus.
///
/// Implemented by the form fields; the form moves focus between them.
///
/// ```rust
/// use countdown_rings::form::Field;
/// use countdown_rings::Component;
///
/// let mut field = Field::new("Hours");
/// assert!(!field.focused());
///
/// field.focus();
/// assert!(field.focused());
///
/// field.blur();
/// assert!(!field.focused());
/// ```
pub trait Component {
    /// Gives the component focus. May return a command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use engine::{Engine, Mode, TickOutcome, TimerState};
pub use error::{CountdownError, Result};
pub use form::Model as DurationForm;
pub use gauge::{GaugeOption, Model as Gauge};
pub use help::Model as HelpModel;
pub use key::{matches, Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use render::{circumference, present, Presentation, PresentationUnit, Unit, RING_RADIUS};
pub use ticker::{TickMsg, Ticker};
pub use time::{decompose, pad, parse_component, total_milliseconds, DurationSpec, Parts};
pub use widget::{FinishedMsg, Model as Countdown};

/// Prelude module for convenient imports.
///
/// ```rust
/// use countdown_rings::prelude::*;
///
/// let spec = DurationSpec::from_seconds(90);
/// assert_eq!(total_milliseconds(&spec), 90_000);
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::engine::{Engine, Mode, TickOutcome, TimerState};
    pub use crate::error::CountdownError;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::render::{present, Presentation, PresentationUnit, Unit};
    pub use crate::time::{decompose, parse_component, total_milliseconds, DurationSpec, Parts};
    pub use crate::widget::{FinishedMsg, Model as Countdown};
    pub use crate::Component;
}
