//! Disease states and timestamped transitions between them.

use std::fmt;

use epi_core::SimTime;

// ── HealthState ───────────────────────────────────────────────────────────────

/// The SEIR-family disease state of an agent.
///
/// `Susceptible` is the sole initial state.  Transition models may route
/// through any of the others; `Recovered` and `Deceased` are conventionally
/// terminal but nothing in the framework assumes so — a model that never
/// schedules a further transition makes a state terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    #[default]
    Susceptible,
    Exposed,
    Infectious,
    Recovered,
    Deceased,
}

impl HealthState {
    /// `true` for states in which the agent carries the pathogen.
    ///
    /// Drives test positivity: a lab test taken at time `t` comes back
    /// positive iff the agent had entered an infected state by `t`.
    #[inline]
    pub fn is_infected(self) -> bool {
        matches!(self, HealthState::Exposed | HealthState::Infectious)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Exposed => "exposed",
            HealthState::Infectious => "infectious",
            HealthState::Recovered => "recovered",
            HealthState::Deceased => "deceased",
        };
        f.write_str(name)
    }
}

// ── HealthTransition ──────────────────────────────────────────────────────────

/// A timestamped change of health state.
///
/// `time = SimTime::INFINITE` means "no scheduled change": the agent stays
/// in `health_state` indefinitely.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthTransition {
    pub time: SimTime,
    pub health_state: HealthState,
}

impl HealthTransition {
    /// The "no scheduled change" value for a given state.
    #[inline]
    pub const fn unscheduled(health_state: HealthState) -> HealthTransition {
        HealthTransition {
            time: SimTime::INFINITE,
            health_state,
        }
    }
}

impl fmt::Display for HealthTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.health_state, self.time)
    }
}
