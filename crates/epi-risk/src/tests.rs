//! Unit tests for the null and tracing risk scores.

use epi_core::{LocationUuid, SimDuration, SimTime, Timestep};
use epi_events::{Contact, Exposure, HealthState, HealthTransition, TestResult};

use crate::{
    LocationKind, RiskScore, TestPolicy, TracingRiskScore, TracingRiskScoreConfig, VisitAdjustment,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: LocationUuid = LocationUuid(0);
const WORK: LocationUuid = LocationUuid(1);

fn day_zero() -> Timestep {
    Timestep::new(SimTime::EPOCH, SimDuration::from_hours(24))
}

fn test_config() -> TracingRiskScoreConfig {
    TracingRiskScoreConfig {
        test_validity_duration: SimDuration::from_days(7),
        contact_retention_duration: SimDuration::from_days(14),
        quarantine_duration: SimDuration::from_days(10),
        test_latency: SimDuration::from_hours(36),
        positive_threshold: 0.5,
    }
}

fn tracing_score() -> TracingRiskScore {
    TracingRiskScore::new(
        test_config(),
        Box::new(|uuid| {
            if uuid == HOME {
                LocationKind::Home
            } else {
                LocationKind::Work
            }
        }),
    )
    .unwrap()
}

fn contact_ending_at(end_secs: i64) -> Contact {
    Contact {
        other_uuid: epi_core::AgentUuid(314),
        exposure: Exposure {
            start_time: SimTime::from_unix_seconds(end_secs - 3_600),
            duration: SimDuration::from_hours(1),
            ..Exposure::default()
        },
    }
}

fn positive_result() -> TestResult {
    TestResult {
        time_requested: SimTime::EPOCH,
        time_received: SimTime::from_unix_seconds(129_600),
        needs_retry: false,
        probability: 1.0,
    }
}

#[cfg(test)]
mod null {
    use super::*;
    use crate::NullRiskScore;

    #[test]
    fn policies_change_nothing() {
        let score = NullRiskScore;
        let ts = day_zero();
        assert_eq!(score.visit_adjustment(&ts, WORK), VisitAdjustment::UNCHANGED);
        assert_eq!(score.test_policy(&ts), TestPolicy::none());
        let ctp = score.contact_tracing_policy();
        assert!(!ctp.report_recursively);
        assert!(!ctp.send_positive_test);
        assert_eq!(score.contact_retention_duration(), SimDuration::ZERO);
    }
}

#[cfg(test)]
mod tracing {
    use super::*;
    use crate::RiskError;

    #[test]
    fn healthy_unnotified_agent_is_unrestricted() {
        let score = tracing_score();
        let ts = day_zero();
        assert_eq!(score.visit_adjustment(&ts, WORK), VisitAdjustment::UNCHANGED);
        assert_eq!(score.visit_adjustment(&ts, HOME), VisitAdjustment::UNCHANGED);
        assert!(!score.test_policy(&ts).should_test);
    }

    #[test]
    fn symptoms_quarantine_non_home_visits_only() {
        let mut score = tracing_score();
        score.add_health_state_transition(&HealthTransition {
            time: SimTime::EPOCH,
            health_state: HealthState::Infectious,
        });
        let ts = day_zero();
        let work = score.visit_adjustment(&ts, WORK);
        assert_eq!(work.frequency_adjustment, 0.0);
        assert_eq!(work.duration_adjustment, 1.0);
        assert_eq!(score.visit_adjustment(&ts, HOME), VisitAdjustment::UNCHANGED);
    }

    #[test]
    fn symptom_onset_requests_test_once() {
        let mut score = tracing_score();
        score.add_health_state_transition(&HealthTransition {
            time: SimTime::from_unix_seconds(-43_200),
            health_state: HealthState::Infectious,
        });

        let policy = score.test_policy(&day_zero());
        assert!(policy.should_test);
        assert_eq!(policy.time_requested, SimTime::from_unix_seconds(-43_200));

        // Once a result has been received, symptoms alone stop re-requesting.
        score.add_test_result(&positive_result());
        assert!(!score.test_policy(&day_zero()).should_test);
    }

    #[test]
    fn notification_quarantines_and_requests_test() {
        let mut score = tracing_score();
        score.add_exposure_notification(&contact_ending_at(3_600), &positive_result());

        let ts = day_zero();
        assert_eq!(score.visit_adjustment(&ts, WORK).frequency_adjustment, 0.0);

        let policy = score.test_policy(&ts);
        assert!(policy.should_test);
        // The sample is taken at the end of the notified contact.
        assert_eq!(policy.time_requested, SimTime::from_unix_seconds(3_600));
        assert_eq!(policy.latency, SimDuration::from_hours(36));
    }

    #[test]
    fn valid_result_suppresses_retest() {
        let mut score = tracing_score();
        score.add_exposure_notification(&contact_ending_at(3_600), &positive_result());
        // A result received after (latest contact − validity) still covers it.
        score.add_test_result(&TestResult {
            time_requested: SimTime::from_unix_seconds(3_600),
            time_received: SimTime::from_unix_seconds(133_200),
            needs_retry: false,
            probability: 0.0,
        });
        assert!(!score.test_policy(&day_zero()).should_test);
    }

    #[test]
    fn stale_negative_triggers_retest_but_stale_positive_stands() {
        let much_later = 30 * 86_400;

        let mut score = tracing_score();
        // Old negative result, then a notification about a much newer contact.
        score.add_test_result(&TestResult {
            time_requested: SimTime::EPOCH,
            time_received: SimTime::from_unix_seconds(129_600),
            needs_retry: false,
            probability: 0.0,
        });
        score.add_exposure_notification(&contact_ending_at(much_later), &positive_result());
        let ts = Timestep::new(
            SimTime::from_unix_seconds(much_later),
            SimDuration::from_hours(24),
        );
        assert!(score.test_policy(&ts).should_test, "stale negative should re-test");

        let mut score = tracing_score();
        score.add_test_result(&TestResult {
            time_requested: SimTime::EPOCH,
            time_received: SimTime::from_unix_seconds(129_600),
            needs_retry: false,
            probability: 1.0,
        });
        score.add_exposure_notification(&contact_ending_at(much_later), &positive_result());
        assert!(
            !score.test_policy(&ts).should_test,
            "stale positive needs no refresh"
        );
    }

    #[test]
    fn needs_retry_result_is_rerequested_verbatim() {
        let mut score = tracing_score();
        score.add_test_result(&TestResult {
            time_requested: SimTime::from_unix_seconds(129_600),
            time_received: SimTime::INFINITE,
            needs_retry: true,
            probability: 0.0,
        });
        let policy = score.test_policy(&day_zero());
        assert!(policy.should_test);
        assert_eq!(policy.time_requested, SimTime::from_unix_seconds(129_600));
    }

    #[test]
    fn old_notifications_age_out() {
        let mut score = tracing_score();
        score.add_exposure_notification(&contact_ending_at(3_600), &positive_result());
        // 20 days later the contact is beyond the 14-day retention window.
        let ts = Timestep::new(
            SimTime::from_unix_seconds(20 * 86_400),
            SimDuration::from_hours(24),
        );
        assert!(!score.test_policy(&ts).should_test);
        assert_eq!(score.visit_adjustment(&ts, WORK), VisitAdjustment::UNCHANGED);
    }

    #[test]
    fn always_shares_positive_tests() {
        let score = tracing_score();
        let ctp = score.contact_tracing_policy();
        assert!(ctp.send_positive_test);
        assert!(!ctp.report_recursively);
    }

    #[test]
    fn config_validation() {
        let bad_threshold = TracingRiskScoreConfig {
            positive_threshold: 1.5,
            ..test_config()
        };
        assert!(matches!(
            TracingRiskScore::new(bad_threshold, Box::new(|_| LocationKind::Home)),
            Err(RiskError::InvalidPositiveThreshold(_))
        ));

        let bad_duration = TracingRiskScoreConfig {
            quarantine_duration: SimDuration::from_seconds(-1),
            ..test_config()
        };
        assert!(matches!(
            TracingRiskScore::new(bad_duration, Box::new(|_| LocationKind::Home)),
            Err(RiskError::NegativeDuration(_))
        ));
    }
}
