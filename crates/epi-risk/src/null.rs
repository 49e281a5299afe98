//! A risk score that observes nothing and changes nothing.

use epi_core::{LocationUuid, SimDuration, Timestep};
use epi_events::{Contact, Exposure, HealthTransition, TestResult};

use crate::score::{ContactTracingPolicy, RiskScore, TestPolicy, VisitAdjustment};

/// The do-nothing policy: visits unchanged, never tests, never reports,
/// retains no contacts.  Useful for baseline runs and as scaffolding in
/// tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRiskScore;

impl RiskScore for NullRiskScore {
    fn add_health_state_transition(&mut self, _transition: &HealthTransition) {}
    fn add_exposures(&mut self, _exposures: &[&Exposure]) {}
    fn add_exposure_notification(&mut self, _contact: &Contact, _result: &TestResult) {}
    fn add_test_result(&mut self, _result: &TestResult) {}

    fn visit_adjustment(
        &self,
        _timestep: &Timestep,
        _location_uuid: LocationUuid,
    ) -> VisitAdjustment {
        VisitAdjustment::UNCHANGED
    }

    fn test_policy(&self, _timestep: &Timestep) -> TestPolicy {
        TestPolicy::none()
    }

    fn contact_tracing_policy(&self) -> ContactTracingPolicy {
        ContactTracingPolicy {
            report_recursively: false,
            send_positive_test: false,
        }
    }

    fn contact_retention_duration(&self) -> SimDuration {
        SimDuration::ZERO
    }
}
