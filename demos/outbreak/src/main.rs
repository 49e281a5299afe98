//! outbreak — smallest end-to-end run of the epi agent framework.
//!
//! Simulates a dozen agents sharing a workplace and a market, with one
//! infectious index case.  The binary plays the host-driver role: it owns
//! the timestep loop, routes visit batches into a toy co-location pairer
//! (standing in for real Location implementations), and routes the
//! resulting infection outcomes and contact reports back to the agents one
//! timestep later.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use epi_agent::SeirAgent;
use epi_core::{AgentUuid, LocationUuid, ModelRng, SimDuration, SimTime, Timestep};
use epi_events::{
    ContactReport, ExposureType, HealthState, HealthTransition, InfectionOutcome,
    MicroExposureGenerator, VecBroker, Visit,
};
use epi_models::{AggregatedTransmissionModel, PttsTransitionModel, TransmissionModel};
use epi_risk::{LocationKind, TracingRiskScore, TracingRiskScoreConfig};
use epi_visit::IndexedLocationVisitGenerator;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: u64 = 12;
const SEED: u64 = 42;
const SIM_DAYS: i64 = 30;
const TRANSMISSIBILITY: f32 = 0.8;

/// Home locations use the agent's own uuid; shared locations start here.
const WORKPLACE: LocationUuid = LocationUuid(1_000);
const MARKET: LocationUuid = LocationUuid(1_001);

// ── Population assembly ───────────────────────────────────────────────────────

fn location_kind(uuid: LocationUuid) -> LocationKind {
    match uuid {
        WORKPLACE => LocationKind::Work,
        MARKET => LocationKind::Community,
        _ => LocationKind::Home,
    }
}

fn transition_model(agent: u64) -> Result<Box<PttsTransitionModel>> {
    // Exposed incubate for ~3 days, then ~8 infectious days ending in
    // recovery or, rarely, death.
    let model = PttsTransitionModel::builder()
        .edge(HealthState::Exposed, HealthState::Infectious, 1.0, 2.0, 1.5)
        .edge(HealthState::Infectious, HealthState::Recovered, 0.97, 4.0, 2.0)
        .edge(HealthState::Infectious, HealthState::Deceased, 0.03, 5.0, 2.0)
        .build(ModelRng::new(SEED, agent))?;
    Ok(Box::new(model))
}

fn build_agent(
    agent: u64,
    transmission: &Arc<dyn TransmissionModel>,
) -> Result<SeirAgent> {
    let uuid = AgentUuid(agent);
    let itinerary = [LocationUuid(agent), WORKPLACE, MARKET];
    let visit_generator = Box::new(IndexedLocationVisitGenerator::new(
        &itinerary,
        ModelRng::new(SEED, AGENT_COUNT + agent),
    )?);
    let risk_score = Box::new(TracingRiskScore::new(
        TracingRiskScoreConfig {
            test_validity_duration: SimDuration::from_days(7),
            contact_retention_duration: SimDuration::from_days(14),
            quarantine_duration: SimDuration::from_days(10),
            test_latency: SimDuration::from_hours(36),
            positive_threshold: 0.5,
        },
        Box::new(location_kind),
    )?);

    let agent = if agent == 0 {
        // Index case: infectious since twelve hours before the run.
        SeirAgent::with_seed_infection(
            uuid,
            HealthTransition {
                time: SimTime::from_hours(-12),
                health_state: HealthState::Infectious,
            },
            Arc::clone(transmission),
            transition_model(uuid.0)?,
            visit_generator,
            risk_score,
        )
    } else {
        SeirAgent::susceptible(
            uuid,
            Arc::clone(transmission),
            transition_model(uuid.0)?,
            visit_generator,
            risk_score,
        )
    };
    Ok(agent)
}

// ── Toy location pairing ──────────────────────────────────────────────────────

/// Pair overlapping visits at each location into infection outcomes — the
/// stand-in for real Location implementations.  Pairs involving an
/// infectious visitor produce one exposure for each side, so both parties
/// retain the contact; the exposure carries the *other* side's infectivity.
fn pair_visits(visits: &[Visit]) -> Vec<InfectionOutcome> {
    let generator = MicroExposureGenerator;
    let mut by_location: HashMap<LocationUuid, Vec<&Visit>> = HashMap::new();
    for visit in visits {
        by_location.entry(visit.location_uuid).or_default().push(visit);
    }

    let mut outcomes = Vec::new();
    for co_visits in by_location.values() {
        for (i, a) in co_visits.iter().enumerate() {
            for b in &co_visits[i + 1..] {
                if a.agent_uuid == b.agent_uuid {
                    continue;
                }
                if a.health_state != HealthState::Infectious
                    && b.health_state != HealthState::Infectious
                {
                    continue;
                }
                let start = SimTime::max(a.start_time, b.start_time);
                let end = SimTime::min(a.end_time, b.end_time);
                if (end - start) < SimDuration::from_minutes(1) {
                    continue;
                }
                for (target, source) in [(a, b), (b, a)] {
                    let infectious = source.health_state == HealthState::Infectious;
                    outcomes.push(InfectionOutcome {
                        agent_uuid: target.agent_uuid,
                        exposure: generator.generate(
                            start,
                            end - start,
                            if infectious { 1.0 } else { 0.0 },
                            if infectious { 0.7 } else { 0.0 },
                        ),
                        exposure_type: ExposureType::Contact,
                        source_uuid: source.agent_uuid,
                    });
                }
            }
        }
    }
    outcomes
}

fn route_outcomes(outcomes: Vec<InfectionOutcome>) -> HashMap<AgentUuid, Vec<InfectionOutcome>> {
    let mut routed: HashMap<AgentUuid, Vec<InfectionOutcome>> = HashMap::new();
    for outcome in outcomes {
        routed.entry(outcome.agent_uuid).or_default().push(outcome);
    }
    routed
}

fn route_reports(reports: Vec<ContactReport>) -> HashMap<AgentUuid, Vec<ContactReport>> {
    let mut routed: HashMap<AgentUuid, Vec<ContactReport>> = HashMap::new();
    for report in reports {
        routed.entry(report.to_agent_uuid).or_default().push(report);
    }
    routed
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== outbreak — epi agent framework ===");
    println!("Agents: {AGENT_COUNT}  |  Days: {SIM_DAYS}  |  Seed: {SEED}");
    println!();

    // 1. Shared transmission model and the population.
    let transmission: Arc<dyn TransmissionModel> = Arc::new(AggregatedTransmissionModel::new(
        TRANSMISSIBILITY,
        ModelRng::new(SEED, u64::MAX),
    )?);
    let mut agents: Vec<SeirAgent> = (0..AGENT_COUNT)
        .map(|i| build_agent(i, &transmission))
        .collect::<Result<_>>()?;

    // 2. Drive the per-timestep protocol, routing each day's output into
    //    the next day's input.
    let mut timestep = Timestep::new(SimTime::EPOCH, SimDuration::from_hours(24));
    let mut pending_outcomes: HashMap<AgentUuid, Vec<InfectionOutcome>> = HashMap::new();
    let mut pending_reports: HashMap<AgentUuid, Vec<ContactReport>> = HashMap::new();

    println!(
        "{:<6} {:>12} {:>9} {:>11} {:>10} {:>9} {:>9}",
        "day", "susceptible", "exposed", "infectious", "recovered", "deceased", "reports"
    );
    for day in 0..SIM_DAYS {
        // ① Ingest yesterday's exposures.
        for agent in agents.iter_mut() {
            let outcomes = pending_outcomes.remove(&agent.uuid()).unwrap_or_default();
            agent.process_infection_outcomes(&timestep, &outcomes);
        }

        // ② Generate today's visits.
        let mut visit_broker = VecBroker::new();
        for agent in agents.iter_mut() {
            agent.compute_visits(&timestep, &mut visit_broker);
        }
        pending_outcomes = route_outcomes(pair_visits(visit_broker.items()));

        // ③ Testing and contact reports.
        let mut report_broker = VecBroker::new();
        for agent in agents.iter_mut() {
            let reports = pending_reports.remove(&agent.uuid()).unwrap_or_default();
            agent.update_contact_reports(&timestep, &reports, &mut report_broker);
        }
        let outgoing_reports = report_broker.drain();
        let report_count = outgoing_reports.len();
        pending_reports = route_reports(outgoing_reports);

        let mut counts = [0usize; 5];
        for agent in &agents {
            let idx = match agent.health_state() {
                HealthState::Susceptible => 0,
                HealthState::Exposed => 1,
                HealthState::Infectious => 2,
                HealthState::Recovered => 3,
                HealthState::Deceased => 4,
            };
            counts[idx] += 1;
        }
        println!(
            "{:<6} {:>12} {:>9} {:>11} {:>10} {:>9} {:>9}",
            day, counts[0], counts[1], counts[2], counts[3], counts[4], report_count
        );

        timestep.advance();
    }

    println!();
    println!("Final health states:");
    for agent in &agents {
        println!("  agent {:>2}: {}", agent.uuid().0, agent.health_state());
    }
    Ok(())
}
