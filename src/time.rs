//! Duration arithmetic for the countdown.
//!
//! Converts a user-entered [`DurationSpec`] into a millisecond total and
//! decomposes a remaining-millisecond count back into whole days, hours,
//! minutes and seconds. Everything here is pure.
//!
//! ```rust
//! use countdown_rings::time::{decompose, total_milliseconds, DurationSpec, Parts};
//!
//! let spec = DurationSpec::new(1, 2, 3, 4);
//! assert_eq!(total_milliseconds(&spec), 93_784_000);
//! assert_eq!(
//!     decompose(93_784_000),
//!     Parts { days: 1, hours: 2, minutes: 3, seconds: 4 }
//! );
//! ```

/// Milliseconds in one day.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;
/// Milliseconds in one hour.
pub const HOUR_MS: u64 = 60 * 60 * 1000;
/// Milliseconds in one minute.
pub const MINUTE_MS: u64 = 60 * 1000;
/// Milliseconds in one second.
pub const SECOND_MS: u64 = 1000;

/// A duration as entered in the form.
///
/// Components are unsigned, so negative input has to be clamped before it
/// gets here; [`parse_component`] does that for raw text. Components are not
/// normalized: `seconds: 90` is a valid spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationSpec {
    /// Whole days.
    pub days: u64,
    /// Whole hours.
    pub hours: u64,
    /// Whole minutes.
    pub minutes: u64,
    /// Whole seconds.
    pub seconds: u64,
}

impl DurationSpec {
    /// Creates a spec from its four components.
    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Creates a spec of only seconds.
    pub fn from_seconds(seconds: u64) -> Self {
        Self::new(0, 0, 0, seconds)
    }

    /// Builds a spec from raw form text, ordered days, hours, minutes, seconds.
    ///
    /// Each field goes through [`parse_component`].
    pub fn from_fields(fields: [&str; 4]) -> Self {
        let [days, hours, minutes, seconds] = fields.map(parse_component);
        Self::new(days, hours, minutes, seconds)
    }

    /// Components in display order.
    pub fn components(&self) -> [u64; 4] {
        [self.days, self.hours, self.minutes, self.seconds]
    }
}

impl From<Parts> for DurationSpec {
    fn from(parts: Parts) -> Self {
        Self::new(parts.days, parts.hours, parts.minutes, parts.seconds)
    }
}

/// Whole units of a remaining duration, as produced by [`decompose`].
///
/// Unlike [`DurationSpec`], `hours < 24`, `minutes < 60` and `seconds < 60`
/// always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parts {
    /// Whole days, unbounded.
    pub days: u64,
    /// Hours within the day.
    pub hours: u64,
    /// Minutes within the hour.
    pub minutes: u64,
    /// Seconds within the minute.
    pub seconds: u64,
}

/// Total milliseconds described by `spec`.
///
/// There is no upper bound; a total that would overflow `u64` saturates.
pub fn total_milliseconds(spec: &DurationSpec) -> u64 {
    spec.days
        .saturating_mul(DAY_MS)
        .saturating_add(spec.hours.saturating_mul(HOUR_MS))
        .saturating_add(spec.minutes.saturating_mul(MINUTE_MS))
        .saturating_add(spec.seconds.saturating_mul(SECOND_MS))
}

/// Splits `remaining_ms` into whole units by floor division.
///
/// Sub-second remainders are dropped, so `999` decomposes to all zeros.
pub fn decompose(remaining_ms: u64) -> Parts {
    Parts {
        days: remaining_ms / DAY_MS,
        hours: (remaining_ms % DAY_MS) / HOUR_MS,
        minutes: (remaining_ms % HOUR_MS) / MINUTE_MS,
        seconds: (remaining_ms % MINUTE_MS) / SECOND_MS,
    }
}

/// Coerces one raw form field into a component.
///
/// Surrounding whitespace is ignored. Empty or non-numeric text yields 0, and
/// so does a negative number. Values too large for `u64` saturate.
pub fn parse_component(raw: &str) -> u64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i128>() {
        Ok(n) if n <= 0 => 0,
        Ok(n) => u64::try_from(n).unwrap_or(u64::MAX),
        Err(_) => 0,
    }
}

/// Zero-pads `n` to two digits.
pub fn pad(n: u64) -> String {
    format!("{:02}", n)
}
