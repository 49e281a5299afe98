//! Simulation time model.
//!
//! # Design
//!
//! Time is a signed microsecond count from the simulation epoch (`SimTime`),
//! and spans are microsecond counts (`SimDuration`).  Both carry an
//! `INFINITE` sentinel: "no scheduled transition" is a transition at
//! `SimTime::INFINITE`, and "never expires" is `SimDuration::INFINITE`.
//!
//! All arithmetic saturates toward the sentinel rather than wrapping, so
//! `t + SimDuration::INFINITE` is `SimTime::INFINITE` and stays there.
//! `SimTime::DISTANT_PAST` is the mirror bound used for "keep everything"
//! horizons; no event ever precedes it.
//!
//! The simulator advances in [`Timestep`]s — half-open `[start, end)`
//! windows, typically a day long.  Event times are not quantized to the
//! timestep: visits and exposures begin and end at arbitrary microsecond
//! offsets inside a window.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation time in microseconds from the simulation epoch.
///
/// Negative values are valid: seeded infections routinely predate the first
/// timestep (an agent infected twelve hours "before the simulation began").
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    /// The simulation epoch.
    pub const EPOCH: SimTime = SimTime(0);

    /// The `+∞` sentinel: "never happens".
    pub const INFINITE: SimTime = SimTime(i64::MAX);

    /// The mirror bound: earlier than every representable event.
    pub const DISTANT_PAST: SimTime = SimTime(i64::MIN);

    #[inline]
    pub const fn from_unix_seconds(secs: i64) -> SimTime {
        SimTime(secs * MICROS_PER_SECOND)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> SimTime {
        SimTime(hours * MICROS_PER_HOUR)
    }

    /// `false` for both sentinels.
    #[inline]
    pub fn is_finite(self) -> bool {
        self != Self::INFINITE && self != Self::DISTANT_PAST
    }
}

impl Add<SimDuration> for SimTime {
    type Output = SimTime;

    /// Saturates to `SimTime::INFINITE` if either operand is infinite or the
    /// sum overflows.
    fn add(self, rhs: SimDuration) -> SimTime {
        if self == SimTime::INFINITE || rhs == SimDuration::INFINITE {
            return SimTime::INFINITE;
        }
        SimTime(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign<SimDuration> for SimTime {
    fn add_assign(&mut self, rhs: SimDuration) {
        *self = *self + rhs;
    }
}

impl Sub<SimDuration> for SimTime {
    type Output = SimTime;

    /// Saturates to `SimTime::DISTANT_PAST` for an infinite duration — the
    /// natural value for a "retain everything" horizon.
    fn sub(self, rhs: SimDuration) -> SimTime {
        if rhs == SimDuration::INFINITE {
            return SimTime::DISTANT_PAST;
        }
        if self == SimTime::INFINITE {
            return SimTime::INFINITE;
        }
        SimTime(self.0.saturating_sub(rhs.0))
    }
}

impl Sub for SimTime {
    type Output = SimDuration;

    /// Elapsed span from `rhs` to `self`, saturating toward `INFINITE`.
    fn sub(self, rhs: SimTime) -> SimDuration {
        if self == SimTime::INFINITE {
            return SimDuration::INFINITE;
        }
        SimDuration(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SimTime::INFINITE => write!(f, "+inf"),
            SimTime::DISTANT_PAST => write!(f, "-inf"),
            SimTime(us) => write!(f, "{}s", us as f64 / MICROS_PER_SECOND as f64),
        }
    }
}

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A span of simulation time in microseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub i64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);

    /// The `+∞` sentinel: "never elapses".
    pub const INFINITE: SimDuration = SimDuration(i64::MAX);

    #[inline]
    pub const fn from_seconds(secs: i64) -> SimDuration {
        SimDuration(secs * MICROS_PER_SECOND)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> SimDuration {
        SimDuration(minutes * MICROS_PER_MINUTE)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> SimDuration {
        SimDuration(hours * MICROS_PER_HOUR)
    }

    #[inline]
    pub const fn from_days(days: i64) -> SimDuration {
        SimDuration(days * MICROS_PER_DAY)
    }

    /// Fractional days, truncating below microsecond resolution.
    /// Saturates to `INFINITE` for non-finite or overflowing inputs.
    pub fn from_days_f64(days: f64) -> SimDuration {
        let micros = days * MICROS_PER_DAY as f64;
        if !micros.is_finite() || micros >= i64::MAX as f64 {
            return SimDuration::INFINITE;
        }
        SimDuration(micros as i64)
    }

    /// Fractional minutes, truncating below microsecond resolution.
    pub fn from_minutes_f32(minutes: f32) -> SimDuration {
        let micros = minutes as f64 * MICROS_PER_MINUTE as f64;
        if !micros.is_finite() || micros >= i64::MAX as f64 {
            return SimDuration::INFINITE;
        }
        SimDuration(micros as i64)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self != Self::INFINITE
    }

    /// Whole minutes contained in this span (truncating).
    #[inline]
    pub fn whole_minutes(self) -> i64 {
        self.0 / MICROS_PER_MINUTE
    }

    /// Scale by a non-negative factor, saturating toward `INFINITE`.
    pub fn mul_f32(self, factor: f32) -> SimDuration {
        if self == SimDuration::INFINITE {
            return SimDuration::INFINITE;
        }
        let micros = self.0 as f64 * factor as f64;
        if !micros.is_finite() || micros >= i64::MAX as f64 {
            return SimDuration::INFINITE;
        }
        SimDuration(micros as i64)
    }
}

impl Add for SimDuration {
    type Output = SimDuration;

    fn add(self, rhs: SimDuration) -> SimDuration {
        if self == SimDuration::INFINITE || rhs == SimDuration::INFINITE {
            return SimDuration::INFINITE;
        }
        SimDuration(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SimDuration::INFINITE => write!(f, "+inf"),
            SimDuration(us) => write!(f, "{}s", us as f64 / MICROS_PER_SECOND as f64),
        }
    }
}

// ── Timestep ──────────────────────────────────────────────────────────────────

/// One half-open `[start, end)` window of simulation time.
///
/// Every agent is advanced exactly once per timestep.  The window length is
/// fixed for the lifetime of a `Timestep` value; [`advance`][Self::advance]
/// slides the window forward by its own length.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestep {
    start: SimTime,
    duration: SimDuration,
}

impl Timestep {
    /// Create a window starting at `start` spanning `duration`.
    ///
    /// # Panics
    /// Panics in debug mode if `duration` is not finite and positive.
    pub fn new(start: SimTime, duration: SimDuration) -> Timestep {
        debug_assert!(
            duration > SimDuration::ZERO && duration.is_finite(),
            "timestep duration must be finite and positive"
        );
        Timestep { start, duration }
    }

    #[inline]
    pub fn start(&self) -> SimTime {
        self.start
    }

    /// One past the last instant of the window.
    #[inline]
    pub fn end(&self) -> SimTime {
        self.start + self.duration
    }

    #[inline]
    pub fn duration(&self) -> SimDuration {
        self.duration
    }

    /// `true` if `time` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, time: SimTime) -> bool {
        time >= self.start && time < self.end()
    }

    /// Slide the window forward by its own length.
    #[inline]
    pub fn advance(&mut self) {
        self.start = self.start + self.duration;
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
