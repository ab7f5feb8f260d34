//! Maps engine state onto a presentation model.
//!
//! [`present`] turns a [`TimerState`] into four [`PresentationUnit`]s, one per
//! granularity, each carrying its numeric value and the scale its ring is
//! drawn against. Rings show the proportion left within their own cycle: the
//! minutes ring empties once an hour, not once per countdown. Days are the
//! exception and scale against the whole days the countdown started with.
//!
//! ```rust
//! use countdown_rings::engine::TimerState;
//! use countdown_rings::render::{present, Unit};
//!
//! let state = TimerState {
//!     running: true,
//!     initial_ms: 90_000,
//!     remaining_ms: 90_000,
//!     ..TimerState::default()
//! };
//! let view = present(&state);
//!
//! assert!(!view.unit(Unit::Days).visible);
//! assert_eq!(view.unit(Unit::Minutes).value, 1);
//! assert_eq!(view.unit(Unit::Seconds).display_value(), "30");
//! ```

use crate::engine::{Mode, TimerState};
use crate::time::{decompose, pad, DAY_MS};
use std::f64::consts::PI;

/// Radius the ring geometry is computed for.
pub const RING_RADIUS: f64 = 48.0;

/// Circumference of a ring of `radius`.
pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// One rendered granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Whole days.
    Days,
    /// Hours within the day.
    Hours,
    /// Minutes within the hour.
    Minutes,
    /// Seconds within the minute.
    Seconds,
}

impl Unit {
    /// All units in display order.
    pub const ALL: [Unit; 4] = [Unit::Days, Unit::Hours, Unit::Minutes, Unit::Seconds];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Days => "Days",
            Unit::Hours => "Hours",
            Unit::Minutes => "Minutes",
            Unit::Seconds => "Seconds",
        }
    }

    fn index(self) -> usize {
        match self {
            Unit::Days => 0,
            Unit::Hours => 1,
            Unit::Minutes => 2,
            Unit::Seconds => 3,
        }
    }
}

/// Numeric value and ring scale for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationUnit {
    /// Which granularity this is.
    pub unit: Unit,
    /// Whole units remaining.
    pub value: u64,
    /// Denominator of the ring fill.
    pub max_for_scale: u64,
    /// Whether the unit is drawn at all.
    pub visible: bool,
}

impl PresentationUnit {
    /// Ring fill in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.max_for_scale == 0 {
            return 0.0;
        }
        (self.value as f64 / self.max_for_scale as f64).clamp(0.0, 1.0)
    }

    /// Stroke offset for a depleting ring of the given circumference.
    pub fn dash_offset(&self, circumference: f64) -> f64 {
        circumference * (1.0 - self.fraction())
    }

    /// Value as displayed; days are unpadded, everything else two digits.
    pub fn display_value(&self) -> String {
        match self.unit {
            Unit::Days => self.value.to_string(),
            _ => pad(self.value),
        }
    }
}

/// Everything the UI needs to paint one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Engine mode at the time of the snapshot.
    pub mode: Mode,
    /// Units ordered days, hours, minutes, seconds.
    pub units: [PresentationUnit; 4],
}

impl Presentation {
    /// The entry for `unit`.
    pub fn unit(&self, unit: Unit) -> &PresentationUnit {
        &self.units[unit.index()]
    }

    /// Units that should be drawn, in display order.
    pub fn visible_units(&self) -> impl Iterator<Item = &PresentationUnit> {
        self.units.iter().filter(|u| u.visible)
    }
}

/// Builds the presentation model for `state`.
pub fn present(state: &TimerState) -> Presentation {
    let parts = decompose(state.remaining_ms);
    let initial_days = state.initial_ms / DAY_MS;

    let entry = |unit, value, max_for_scale, visible| PresentationUnit {
        unit,
        value,
        max_for_scale,
        visible,
    };

    Presentation {
        mode: state.mode(),
        units: [
            entry(Unit::Days, parts.days, initial_days.max(1), initial_days > 0),
            entry(Unit::Hours, parts.hours, 24, true),
            entry(Unit::Minutes, parts.minutes, 60, true),
            entry(Unit::Seconds, parts.seconds, 60, true),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{total_milliseconds, DurationSpec};

    fn state_for(initial: DurationSpec, remaining_ms: u64) -> TimerState {
        TimerState {
            running: true,
            paused: false,
            initial_ms: total_milliseconds(&initial),
            target_epoch_ms: None,
            remaining_ms,
        }
    }

    #[test]
    fn test_units_are_ordered() {
        let view = present(&TimerState::default());
        let order: Vec<Unit> = view.units.iter().map(|u| u.unit).collect();
        assert_eq!(order, Unit::ALL.to_vec());
    }

    #[test]
    fn test_days_hidden_for_sub_day_durations() {
        let spec = DurationSpec::new(0, 23, 59, 59);
        let view = present(&state_for(spec, total_milliseconds(&spec)));

        let days = view.unit(Unit::Days);
        assert!(!days.visible);
        assert_eq!(days.max_for_scale, 1);
        assert_eq!(view.visible_units().count(), 3);
    }

    #[test]
    fn test_days_scale_against_initial_days() {
        let spec = DurationSpec::new(3, 12, 0, 0);
        let view = present(&state_for(spec, 2 * DAY_MS));

        let days = view.unit(Unit::Days);
        assert!(days.visible);
        assert_eq!(days.max_for_scale, 3);
        assert_eq!(days.value, 2);
        assert!((days.fraction() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sub_day_units_use_natural_modulus() {
        let spec = DurationSpec::new(0, 2, 30, 15);
        let view = present(&state_for(spec, total_milliseconds(&spec)));

        assert_eq!(view.unit(Unit::Hours).max_for_scale, 24);
        assert_eq!(view.unit(Unit::Minutes).max_for_scale, 60);
        assert_eq!(view.unit(Unit::Seconds).max_for_scale, 60);

        // Minutes ring is half full at 30 minutes, regardless of the total
        assert!((view.unit(Unit::Minutes).fraction() - 0.5).abs() < 1e-9);
        assert!((view.unit(Unit::Seconds).fraction() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_dash_offset_depletes() {
        let full = PresentationUnit {
            unit: Unit::Seconds,
            value: 60,
            max_for_scale: 60,
            visible: true,
        };
        let empty = PresentationUnit { value: 0, ..full };
        let c = circumference(RING_RADIUS);

        assert_eq!(full.dash_offset(c), 0.0);
        assert!((empty.dash_offset(c) - c).abs() < 1e-9);
    }

    #[test]
    fn test_fraction_clamps() {
        let over = PresentationUnit {
            unit: Unit::Hours,
            value: 30,
            max_for_scale: 24,
            visible: true,
        };
        assert_eq!(over.fraction(), 1.0);

        let degenerate = PresentationUnit {
            max_for_scale: 0,
            ..over
        };
        assert_eq!(degenerate.fraction(), 0.0);
    }

    #[test]
    fn test_display_value_padding() {
        let spec = DurationSpec::new(12, 3, 4, 5);
        let view = present(&state_for(spec, total_milliseconds(&spec)));

        assert_eq!(view.unit(Unit::Days).display_value(), "12");
        assert_eq!(view.unit(Unit::Hours).display_value(), "03");
        assert_eq!(view.unit(Unit::Minutes).display_value(), "04");
        assert_eq!(view.unit(Unit::Seconds).display_value(), "05");
    }

    #[test]
    fn test_mode_carried_through() {
        let mut state = state_for(DurationSpec::from_seconds(5), 5_000);
        assert_eq!(present(&state).mode, Mode::Running);

        state.paused = true;
        assert_eq!(present(&state).mode, Mode::Paused);

        state.running = false;
        state.paused = false;
        state.remaining_ms = 0;
        assert_eq!(present(&state).mode, Mode::Finished);
    }

    #[test]
    fn test_circumference() {
        assert!((circumference(1.0) - 2.0 * PI).abs() < 1e-12);
    }
}
