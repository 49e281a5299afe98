//! A risk score implementing test, trace, and isolate guidance.

use epi_core::{LocationUuid, SimDuration, SimTime, Timestep};
use epi_events::{Contact, Exposure, HealthState, HealthTransition, TestResult};

use crate::error::{RiskError, RiskResult};
use crate::score::{ContactTracingPolicy, RiskScore, TestPolicy, VisitAdjustment};

// ── Location kinds ────────────────────────────────────────────────────────────

/// Coarse location classification used by quarantine rules: a quarantining
/// agent keeps visiting home and drops everything else.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationKind {
    Home,
    Work,
    Community,
}

/// Resolves a location uuid to its kind.  Supplied by the host, which owns
/// the location registry.
pub type LocationKindFn = Box<dyn Fn(LocationUuid) -> LocationKind + Send + Sync>;

// ── Config ────────────────────────────────────────────────────────────────────

/// Tuning knobs for [`TracingRiskScore`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracingRiskScoreConfig {
    /// How long a test result is trusted before a newer contact forces a
    /// re-test.
    pub test_validity_duration: SimDuration,
    /// How long contacts stay relevant (also the agent-side retention
    /// window).
    pub contact_retention_duration: SimDuration,
    /// How long to isolate after the latest positive-contact notification.
    pub quarantine_duration: SimDuration,
    /// Requested-to-received turnaround for tests.
    pub test_latency: SimDuration,
    /// Probability at or above which a reported result counts as positive.
    pub positive_threshold: f32,
}

// ── TracingRiskScore ──────────────────────────────────────────────────────────

/// Test/trace/isolate policy:
///
/// - Symptomatic (any non-susceptible state) or recently-notified agents
///   quarantine: all non-home visits are dropped.
/// - Symptom onset triggers a test request; so does a notification from a
///   positive contact, unless a still-valid result covers it.  Stale
///   negative results are re-requested.
/// - Positive results are always forwarded to retained contacts.
pub struct TracingRiskScore {
    config: TracingRiskScoreConfig,
    location_kind: LocationKindFn,
    latest_health_state: HealthState,
    /// When the agent last became infectious, if ever.
    symptom_onset: Option<SimTime>,
    /// End of the most recent exposure a positive contact notified us about.
    latest_contact_end: SimTime,
    test_result: TestResult,
}

impl TracingRiskScore {
    pub fn new(config: TracingRiskScoreConfig, location_kind: LocationKindFn) -> RiskResult<Self> {
        if !(0.0..=1.0).contains(&config.positive_threshold) {
            return Err(RiskError::InvalidPositiveThreshold(config.positive_threshold));
        }
        for (duration, name) in [
            (config.test_validity_duration, "test validity duration"),
            (config.contact_retention_duration, "contact retention duration"),
            (config.quarantine_duration, "quarantine duration"),
            (config.test_latency, "test latency"),
        ] {
            if duration < SimDuration::ZERO {
                return Err(RiskError::NegativeDuration(name));
            }
        }
        Ok(TracingRiskScore {
            config,
            location_kind,
            latest_health_state: HealthState::Susceptible,
            symptom_onset: None,
            latest_contact_end: SimTime::DISTANT_PAST,
            test_result: TestResult::UNREQUESTED,
        })
    }

    fn needs_new_test_from_symptoms(&self) -> bool {
        // An untested symptomatic agent gets sampled at symptom onset.
        self.symptom_onset.is_some() && self.test_result.time_received == SimTime::INFINITE
    }

    fn has_retained_positive_contact(&self, timestep: &Timestep) -> bool {
        self.latest_contact_end != SimTime::DISTANT_PAST
            && self.latest_contact_end
                >= timestep.start() - self.config.contact_retention_duration
    }

    fn needs_new_test_from_contacts(&self, timestep: &Timestep) -> bool {
        if !self.has_retained_positive_contact(timestep) {
            return false;
        }
        if self.test_result.time_received == SimTime::INFINITE {
            // Has not yet requested a test.
            return true;
        }
        if self.test_result.time_received
            > self.latest_contact_end - self.config.test_validity_duration
        {
            // Result still covers the latest notified contact.
            return false;
        }
        // A stale negative must be refreshed; a stale positive stands.
        self.test_result.probability < self.config.positive_threshold
    }

    fn should_quarantine_from_contacts(&self, timestep: &Timestep) -> bool {
        let earliest = SimTime::min(
            timestep.start() - self.config.contact_retention_duration,
            self.latest_contact_end,
        );
        let latest = self.latest_contact_end + self.config.quarantine_duration;
        timestep.start() < latest && timestep.end() > earliest
    }

    fn should_quarantine_from_symptoms(&self) -> bool {
        self.latest_health_state != HealthState::Susceptible
    }
}

impl RiskScore for TracingRiskScore {
    fn add_health_state_transition(&mut self, transition: &HealthTransition) {
        self.latest_health_state = transition.health_state;
        if transition.health_state == HealthState::Infectious {
            self.symptom_onset = Some(transition.time);
        }
    }

    fn add_exposures(&mut self, _exposures: &[&Exposure]) {}

    fn add_exposure_notification(&mut self, contact: &Contact, _result: &TestResult) {
        self.latest_contact_end = SimTime::max(self.latest_contact_end, contact.exposure.end_time());
    }

    fn add_test_result(&mut self, result: &TestResult) {
        self.test_result = *result;
    }

    fn visit_adjustment(
        &self,
        timestep: &Timestep,
        location_uuid: LocationUuid,
    ) -> VisitAdjustment {
        let skip_visit = (self.location_kind)(location_uuid) != LocationKind::Home
            && (self.should_quarantine_from_contacts(timestep)
                || self.should_quarantine_from_symptoms());
        VisitAdjustment {
            frequency_adjustment: if skip_visit { 0.0 } else { 1.0 },
            duration_adjustment: 1.0,
        }
    }

    fn test_policy(&self, timestep: &Timestep) -> TestPolicy {
        if self.test_result.needs_retry {
            return TestPolicy {
                should_test: true,
                time_requested: self.test_result.time_requested,
                latency: self.config.test_latency,
            };
        }
        if self.needs_new_test_from_symptoms() {
            return TestPolicy {
                should_test: true,
                time_requested: self.symptom_onset.unwrap_or(SimTime::DISTANT_PAST),
                latency: self.config.test_latency,
            };
        }
        if self.needs_new_test_from_contacts(timestep) {
            return TestPolicy {
                should_test: true,
                time_requested: self.latest_contact_end,
                latency: self.config.test_latency,
            };
        }
        TestPolicy::none()
    }

    fn contact_tracing_policy(&self) -> ContactTracingPolicy {
        ContactTracingPolicy {
            report_recursively: false,
            send_positive_test: true,
        }
    }

    fn contact_retention_duration(&self) -> SimDuration {
        self.config.contact_retention_duration
    }
}
