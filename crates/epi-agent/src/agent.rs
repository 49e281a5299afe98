//! The `SeirAgent` state machine.

use std::collections::HashSet;
use std::sync::Arc;

use epi_core::{AgentUuid, SimDuration, SimTime, Timestep};
use epi_events::{
    Broker, Contact, ContactReport, HealthState, HealthTransition, InfectionOutcome, TestResult,
    Visit,
};
use epi_models::{TransitionModel, TransmissionModel};
use epi_risk::RiskScore;
use epi_visit::VisitGenerator;

/// Minimum spacing between recorded transitions.  Normalizing model output
/// to this grid keeps recorded times strictly increasing and visit splits
/// non-degenerate.
const TRANSITION_SPACING: SimDuration = SimDuration::from_seconds(1);

// ── SeirAgent ─────────────────────────────────────────────────────────────────

/// A single simulated individual.
///
/// The agent holds a piecewise-constant health timeline: a strictly
/// time-ordered log of past transitions plus one scheduled
/// `next_transition` (`time = +∞` when nothing is scheduled).  Visits are
/// projected onto that timeline, incoming exposures may start it, and the
/// testing/contact-reporting protocol reads it.
///
/// The transition model, visit generator, and risk score are owned
/// exclusively; the transmission model is shared across the population.
/// Brokers are borrowed per call and never retained.
pub struct SeirAgent {
    uuid: AgentUuid,
    /// Past transitions, strictly increasing in time.  Empty while the
    /// agent has always been susceptible.
    transitions: Vec<HealthTransition>,
    next_transition: HealthTransition,
    /// When the agent first entered an infected state; drives test results.
    first_infection_time: Option<SimTime>,
    /// Dedup keys of every exposure ever ingested in the retention window.
    seen_exposures: HashSet<(AgentUuid, SimTime)>,
    /// Retained contacts in arrival order.
    contacts: Vec<Contact>,
    test_result: TestResult,

    transmission_model: Arc<dyn TransmissionModel>,
    transition_model: Box<dyn TransitionModel>,
    visit_generator: Box<dyn VisitGenerator>,
    risk_score: Box<dyn RiskScore>,
}

impl SeirAgent {
    // ── Construction ──────────────────────────────────────────────────────

    /// An agent that starts susceptible with no scheduled transition.
    pub fn susceptible(
        uuid: AgentUuid,
        transmission_model: Arc<dyn TransmissionModel>,
        transition_model: Box<dyn TransitionModel>,
        visit_generator: Box<dyn VisitGenerator>,
        risk_score: Box<dyn RiskScore>,
    ) -> SeirAgent {
        SeirAgent {
            uuid,
            transitions: Vec::new(),
            next_transition: HealthTransition::unscheduled(HealthState::Susceptible),
            first_infection_time: None,
            seen_exposures: HashSet::new(),
            contacts: Vec::new(),
            test_result: TestResult::UNREQUESTED,
            transmission_model,
            transition_model,
            visit_generator,
            risk_score,
        }
    }

    /// An agent seeded with a non-susceptible state (e.g. the outbreak's
    /// index cases).  The transition model is consulted immediately to
    /// schedule what follows the seed.
    ///
    /// # Panics
    /// Panics in debug mode if the seed state is `Susceptible` — susceptible
    /// agents have no transition to seed; use [`SeirAgent::susceptible`].
    pub fn with_seed_infection(
        uuid: AgentUuid,
        initial_transition: HealthTransition,
        transmission_model: Arc<dyn TransmissionModel>,
        transition_model: Box<dyn TransitionModel>,
        visit_generator: Box<dyn VisitGenerator>,
        risk_score: Box<dyn RiskScore>,
    ) -> SeirAgent {
        debug_assert!(
            initial_transition.health_state != HealthState::Susceptible,
            "susceptible is not a seedable state"
        );
        let mut agent = SeirAgent::susceptible(
            uuid,
            transmission_model,
            transition_model,
            visit_generator,
            risk_score,
        );
        agent.record_transition(initial_transition);
        agent.next_transition = agent.transition_model.next_transition(&initial_transition);
        agent
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn uuid(&self) -> AgentUuid {
        self.uuid
    }

    /// The state the agent is in right now (after all recorded transitions).
    pub fn health_state(&self) -> HealthState {
        self.transitions
            .last()
            .map(|t| t.health_state)
            .unwrap_or(HealthState::Susceptible)
    }

    /// The scheduled transition, or `{ +∞, current }` when none is.
    pub fn next_health_transition(&self) -> HealthTransition {
        self.next_transition
    }

    /// Contacts currently retained, oldest first.
    pub fn retained_contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn latest_test_result(&self) -> TestResult {
        self.test_result
    }

    // ── ① process_infection_outcomes ──────────────────────────────────────

    /// Ingest the exposure outcomes of the previous timestep.
    ///
    /// Outcomes are deduplicated on `(source_uuid, exposure.start_time)`;
    /// new exposures enter the contact log and the risk score.  Only a
    /// still-susceptible agent consults the transmission model, and only
    /// once per batch that contributed anything new: the first exposure
    /// permanently decides the disease path.
    ///
    /// # Panics
    /// Panics in debug mode if any outcome is addressed to another agent;
    /// in release such input is undefined.
    pub fn process_infection_outcomes(
        &mut self,
        _timestep: &Timestep,
        outcomes: &[InfectionOutcome],
    ) {
        debug_assert!(
            outcomes.iter().all(|o| o.agent_uuid == self.uuid),
            "infection outcome routed to wrong agent"
        );

        let first_new = self.contacts.len();
        for outcome in outcomes {
            let key = (outcome.source_uuid, outcome.exposure.start_time);
            if self.seen_exposures.insert(key) {
                self.contacts.push(Contact {
                    other_uuid: outcome.source_uuid,
                    exposure: outcome.exposure.clone(),
                });
            }
        }
        if self.contacts.len() == first_new {
            return;
        }

        let new_exposures: Vec<_> = self.contacts[first_new..]
            .iter()
            .map(|c| &c.exposure)
            .collect();
        self.risk_score.add_exposures(&new_exposures);

        if self.health_state() != HealthState::Susceptible {
            // Recorded for tracing, but the disease path is already set.
            return;
        }

        let outcome = self.transmission_model.infection_outcome(&new_exposures);
        if outcome.health_state == HealthState::Exposed {
            self.record_transition(outcome);
            self.next_transition = self.transition_model.next_transition(&outcome);
        } else {
            self.next_transition = HealthTransition::unscheduled(HealthState::Susceptible);
        }
    }

    // ── ② compute_visits ──────────────────────────────────────────────────

    /// Advance the state machine across `timestep`, then generate, split,
    /// and send this timestep's visits.
    ///
    /// Raw visits come from the generator ignorant of the disease
    /// progression; each is split at every transition boundary inside it so
    /// every sent visit has one well-defined health state.  Zero-length
    /// pieces are dropped, and nothing is sent when nothing survives.
    pub fn compute_visits(&mut self, timestep: &Timestep, broker: &mut dyn Broker<Visit>) {
        self.advance_health_states(timestep);

        let mut raw = Vec::new();
        self.visit_generator
            .generate_visits(timestep, self.risk_score.as_ref(), &mut raw);

        let boundaries: Vec<SimTime> = self
            .transitions
            .iter()
            .map(|t| t.time)
            .filter(|&t| t > timestep.start() && t < timestep.end())
            .collect();

        let mut visits = Vec::with_capacity(raw.len() + boundaries.len());
        for visit in &raw {
            if visit.start_time >= visit.end_time {
                continue;
            }
            self.split_visit(visit, &boundaries, &mut visits);
        }
        if !visits.is_empty() {
            broker.send(&visits);
        }
    }

    /// Consume every scheduled transition that falls inside `timestep`.
    ///
    /// Two normalizations keep the recorded log usable for splitting:
    /// a transition that should already have happened is deferred to the
    /// last spacing unit of the window (the outgoing state keeps a
    /// non-empty span), and a time colliding with the previous record is
    /// bumped one spacing unit past it.  A model that fails to advance time
    /// ends the loop for this timestep.
    fn advance_health_states(&mut self, timestep: &Timestep) {
        while self.next_transition.time < timestep.end() {
            let original_time = self.next_transition.time;

            let mut transition = self.next_transition;
            if transition.time < timestep.start() {
                transition.time = timestep.end() - TRANSITION_SPACING;
            }
            if let Some(last) = self.transitions.last() {
                if transition.time <= last.time {
                    transition.time = last.time + TRANSITION_SPACING;
                }
            }

            self.record_transition(transition);
            self.next_transition = self.transition_model.next_transition(&transition);

            if self.next_transition.time <= original_time {
                break;
            }
        }
    }

    /// Append `transition` to the log and let the risk score observe it.
    fn record_transition(&mut self, transition: HealthTransition) {
        debug_assert!(
            self.transitions
                .last()
                .map_or(true, |last| transition.time > last.time),
            "recorded transitions must be strictly increasing"
        );
        if transition.health_state.is_infected() && self.first_infection_time.is_none() {
            self.first_infection_time = Some(transition.time);
        }
        self.risk_score.add_health_state_transition(&transition);
        self.transitions.push(transition);
    }

    /// Split one raw visit at the boundaries inside it, stamping identity
    /// and the state in effect at each piece's start.
    fn split_visit(&self, raw: &Visit, boundaries: &[SimTime], out: &mut Vec<Visit>) {
        let mut start_time = raw.start_time;
        for &boundary in boundaries {
            if boundary <= start_time {
                continue;
            }
            if boundary >= raw.end_time {
                break;
            }
            out.push(self.stamped_visit(raw, start_time, boundary));
            start_time = boundary;
        }
        if start_time < raw.end_time {
            out.push(self.stamped_visit(raw, start_time, raw.end_time));
        }
    }

    fn stamped_visit(&self, raw: &Visit, start_time: SimTime, end_time: SimTime) -> Visit {
        Visit {
            location_uuid: raw.location_uuid,
            agent_uuid: self.uuid,
            start_time,
            end_time,
            health_state: self.health_state_at(start_time),
        }
    }

    /// The state in effect at `time`: that of the latest recorded
    /// transition at or before it, susceptible before the first.
    fn health_state_at(&self, time: SimTime) -> HealthState {
        let idx = self.transitions.partition_point(|t| t.time <= time);
        if idx == 0 {
            HealthState::Susceptible
        } else {
            self.transitions[idx - 1].health_state
        }
    }

    // ── ③ update_contact_reports ──────────────────────────────────────────

    /// Ingest peer notifications, run the testing protocol, broadcast a
    /// positive result to retained contacts, and prune the contact log.
    ///
    /// # Panics
    /// Panics in debug mode if any report is addressed to another agent; in
    /// release such input is undefined.
    pub fn update_contact_reports(
        &mut self,
        timestep: &Timestep,
        reports: &[ContactReport],
        broker: &mut dyn Broker<ContactReport>,
    ) {
        debug_assert!(
            reports.iter().all(|r| r.to_agent_uuid == self.uuid),
            "contact report routed to wrong agent"
        );

        for report in reports {
            let contact = self
                .contacts
                .iter()
                .find(|c| c.other_uuid == report.from_agent_uuid);
            if let Some(contact) = contact {
                self.risk_score
                    .add_exposure_notification(contact, &report.test_result);
            }
        }

        self.resolve_test_result(timestep);
        self.request_test(timestep);
        self.send_contact_reports(broker);
        self.prune_contacts(timestep);
    }

    /// Materialize a deliverable pending result, then report the current
    /// result (resolved or not) to the risk score.
    fn resolve_test_result(&mut self, timestep: &Timestep) {
        if self.test_result.time_received <= timestep.end() {
            self.test_result.probability = self.test_outcome_at(self.test_result.time_requested);
            self.test_result.needs_retry = false;
        }
        self.risk_score.add_test_result(&self.test_result);
    }

    /// Request a test per the risk score's policy.
    ///
    /// A request inside the current window resolves immediately — the
    /// infection history up to the sample time is already known.  A request
    /// beyond the window cannot be taken yet; it is marked `needs_retry`
    /// and re-requested next timestep.
    fn request_test(&mut self, timestep: &Timestep) {
        let policy = self.risk_score.test_policy(timestep);
        if !policy.should_test {
            return;
        }
        let may_request = !self.test_result.is_requested()
            || self.test_result.needs_retry
            || self.test_result.time_received <= timestep.end();
        if !may_request {
            return;
        }

        self.test_result = if policy.time_requested < timestep.end() {
            TestResult {
                time_requested: policy.time_requested,
                time_received: policy.time_requested + policy.latency,
                needs_retry: false,
                probability: self.test_outcome_at(policy.time_requested),
            }
        } else {
            TestResult {
                time_requested: policy.time_requested,
                time_received: SimTime::INFINITE,
                needs_retry: true,
                probability: 0.0,
            }
        };
        self.risk_score.add_test_result(&self.test_result);
    }

    /// 1.0 iff the agent had entered an infected state by the sample time.
    fn test_outcome_at(&self, sample_time: SimTime) -> f32 {
        match self.first_infection_time {
            Some(t) if t <= sample_time => 1.0,
            _ => 0.0,
        }
    }

    /// Broadcast a positive resolved result to every retained contact, in
    /// log order, as one batch.
    fn send_contact_reports(&mut self, broker: &mut dyn Broker<ContactReport>) {
        let policy = self.risk_score.contact_tracing_policy();
        if policy.report_recursively {
            log::warn!(
                "agent {}: recursive contact reporting requested but not supported",
                self.uuid
            );
        }
        if !policy.send_positive_test
            || !self.test_result.is_requested()
            || !self.test_result.is_positive()
        {
            return;
        }
        let reports: Vec<ContactReport> = self
            .contacts
            .iter()
            .map(|contact| ContactReport {
                from_agent_uuid: self.uuid,
                to_agent_uuid: contact.other_uuid,
                test_result: self.test_result,
            })
            .collect();
        if !reports.is_empty() {
            broker.send(&reports);
        }
    }

    /// Drop contacts (and their dedup keys) older than the risk score's
    /// retention horizon.
    fn prune_contacts(&mut self, timestep: &Timestep) {
        let horizon = timestep.end() - self.risk_score.contact_retention_duration();
        self.contacts
            .retain(|c| c.exposure.start_time >= horizon);
        self.seen_exposures
            .retain(|&(_, start_time)| start_time >= horizon);
    }
}
