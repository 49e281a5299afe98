//! The `RiskScore` trait and its policy value types.

use epi_core::{LocationUuid, SimDuration, SimTime, Timestep};
use epi_events::{Contact, Exposure, HealthTransition, TestResult};

// ── Policy value types ────────────────────────────────────────────────────────

/// How an agent should scale its visits to one location.
///
/// `frequency_adjustment` is the probability the visit happens at all;
/// `duration_adjustment` scales the sampled dwell time.  Both are
/// non-negative and `1.0` means unchanged.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitAdjustment {
    pub frequency_adjustment: f32,
    pub duration_adjustment: f32,
}

impl VisitAdjustment {
    pub const UNCHANGED: VisitAdjustment = VisitAdjustment {
        frequency_adjustment: 1.0,
        duration_adjustment: 1.0,
    };
}

/// Whether and how to request a lab test.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestPolicy {
    pub should_test: bool,
    /// When the sample should be taken.
    pub time_requested: SimTime,
    /// Turnaround from sample to result.
    pub latency: SimDuration,
}

impl TestPolicy {
    /// "Do not test."
    pub const fn none() -> TestPolicy {
        TestPolicy {
            should_test: false,
            time_requested: SimTime::INFINITE,
            latency: SimDuration::INFINITE,
        }
    }
}

/// Which contact reports to emit.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactTracingPolicy {
    /// Forward reports received from contacts onward.  Not supported by the
    /// agent; requesting it is logged and ignored.
    pub report_recursively: bool,
    /// Send the agent's own positive test result to retained contacts.
    pub send_positive_test: bool,
}

// ── RiskScore ─────────────────────────────────────────────────────────────────

/// Per-agent policy object.
///
/// The agent calls the observational methods in a fixed order within each
/// timestep — `add_health_state_transition` (as transitions are consumed),
/// `add_exposures`, `add_exposure_notification`, `add_test_result` — and the
/// query methods are pure over whatever has been observed by the call point.
///
/// Different agents may hold entirely different policies (an essential
/// worker's score may never restrict visits that another agent's score
/// forbids).
pub trait RiskScore: Send {
    fn add_health_state_transition(&mut self, transition: &HealthTransition);
    fn add_exposures(&mut self, exposures: &[&Exposure]);
    fn add_exposure_notification(&mut self, contact: &Contact, result: &TestResult);
    fn add_test_result(&mut self, result: &TestResult);

    /// The adjustment this agent should make to visits to `location_uuid`.
    fn visit_adjustment(&self, timestep: &Timestep, location_uuid: LocationUuid)
        -> VisitAdjustment;

    fn test_policy(&self, timestep: &Timestep) -> TestPolicy;

    fn contact_tracing_policy(&self) -> ContactTracingPolicy;

    /// How long contacts stay relevant for notification and testing.
    fn contact_retention_duration(&self) -> SimDuration;
}
