//! Value types that move between agents and locations.
//!
//! These are plain data: all behavior lives in the agent and the models.
//! Every record is `PartialEq` so tests can compare whole batches.

use epi_core::{AgentUuid, LocationUuid, SimDuration, SimTime};

use crate::health::HealthState;
use crate::micro::MICRO_EXPOSURE_BUCKETS;

// ── Exposure ──────────────────────────────────────────────────────────────────

/// A directed, time-bounded contact event carrying enough information to
/// drive infection probability.
///
/// `micro_exposure_counts[b]` is the number of minutes spent in distance
/// bucket `b` during the overlap — see [`crate::micro`].
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exposure {
    pub start_time: SimTime,
    pub duration: SimDuration,
    /// Infectiousness of the source over the overlap, in [0, 1].
    pub infectivity: f32,
    /// Symptom-driven shedding factor of the source, in [0, 1].  Carried for
    /// downstream models; the bucket algorithm does not consume it.
    pub symptom_factor: f32,
    pub micro_exposure_counts: [u8; MICRO_EXPOSURE_BUCKETS],
}

impl Exposure {
    #[inline]
    pub fn end_time(&self) -> SimTime {
        self.start_time + self.duration
    }

    /// Total overlap minutes recorded across all distance buckets.
    #[inline]
    pub fn micro_exposure_minutes(&self) -> u32 {
        self.micro_exposure_counts.iter().map(|&c| c as u32).sum()
    }
}

impl Default for Exposure {
    fn default() -> Exposure {
        Exposure {
            start_time: SimTime::EPOCH,
            duration: SimDuration::ZERO,
            infectivity: 0.0,
            symptom_factor: 0.0,
            micro_exposure_counts: [0; MICRO_EXPOSURE_BUCKETS],
        }
    }
}

// ── Contact ───────────────────────────────────────────────────────────────────

/// A retained [`Exposure`] paired with the other party's uuid.
///
/// Agents keep contacts only as long as their risk score's retention window
/// allows; contact reports are matched against this log.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    pub other_uuid: AgentUuid,
    pub exposure: Exposure,
}

// ── InfectionOutcome ──────────────────────────────────────────────────────────

/// How an exposure reached the agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExposureType {
    /// Person-to-person overlap at a shared location.
    Contact,
}

/// One exposure delivered to one agent, produced by a location after pairing
/// that agent's visit with an infectious co-visitor.
///
/// `agent_uuid` must equal the receiving agent's uuid; routing a batch to
/// the wrong agent is a programmer error.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfectionOutcome {
    pub agent_uuid: AgentUuid,
    pub exposure: Exposure,
    pub exposure_type: ExposureType,
    pub source_uuid: AgentUuid,
}

// ── Visit ─────────────────────────────────────────────────────────────────────

/// One agent's presence at one location over `[start_time, end_time)`.
///
/// Visit generators fill only the location and the interval; the agent layer
/// stamps `agent_uuid` and the `health_state` in effect throughout the
/// visit before anything is sent.  A visit never straddles a health
/// transition — the agent splits it first.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub location_uuid: LocationUuid,
    pub agent_uuid: AgentUuid,
    pub start_time: SimTime,
    pub end_time: SimTime,
    pub health_state: HealthState,
}

// ── TestResult ────────────────────────────────────────────────────────────────

/// The latest lab-test state of an agent.
///
/// `probability` is the reported positivity (1.0 or 0.0 once resolved).
/// `needs_retry` marks a request that could not be taken inside the window
/// it was made in; the agent re-requests it the next timestep.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestResult {
    pub time_requested: SimTime,
    pub time_received: SimTime,
    pub needs_retry: bool,
    pub probability: f32,
}

impl TestResult {
    /// The sentinel an agent starts with: nothing requested, nothing known.
    pub const UNREQUESTED: TestResult = TestResult {
        time_requested: SimTime::INFINITE,
        time_received: SimTime::INFINITE,
        needs_retry: false,
        probability: 0.0,
    };

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.time_requested != SimTime::INFINITE
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.probability > 0.0
    }
}

impl Default for TestResult {
    fn default() -> TestResult {
        TestResult::UNREQUESTED
    }
}

// ── ContactReport ─────────────────────────────────────────────────────────────

/// A test result forwarded from one agent to a retained contact.
///
/// `to_agent_uuid` must equal the receiving agent's uuid.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactReport {
    pub from_agent_uuid: AgentUuid,
    pub to_agent_uuid: AgentUuid,
    pub test_result: TestResult,
}
