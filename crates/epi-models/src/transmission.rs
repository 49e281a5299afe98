//! Exposure-to-infection resolution: the `TransmissionModel` seam and the
//! aggregated dose-response model over it.

use std::sync::Mutex;

use epi_core::{ModelRng, SimTime};
use epi_events::{Exposure, HealthState, HealthTransition};

use crate::error::{ModelError, ModelResult};

// ── TransmissionModel ─────────────────────────────────────────────────────────

/// Decides whether a batch of exposures infects an agent, and when.
///
/// Returns either an `Exposed` transition with a definite time or the
/// unchanged `{ INFINITE, Susceptible }`.  The function is pure in its
/// inputs plus internal RNG state.
///
/// One instance is shared by every agent (`Arc<dyn TransmissionModel>`), so
/// the receiver is `&self` and stateful implementations synchronize
/// internally.
pub trait TransmissionModel: Send + Sync {
    fn infection_outcome(&self, exposures: &[&Exposure]) -> HealthTransition;
}

// ── AggregatedTransmissionModel ───────────────────────────────────────────────

/// Dose-response model aggregating a batch of exposures into one infection
/// probability:
///
/// ```text
/// p = 1 - exp(-transmissibility * Σ_i ln(1 + infectivity_i * symptom_factor_i * dose_i))
/// ```
///
/// where `dose_i` is exposure *i*'s micro-exposure minutes scaled to hours,
/// so a one-hour fully-infectious, fully-symptomatic contact contributes
/// `ln 2` to the sum.  On a successful Bernoulli draw the agent becomes
/// exposed at the end of the latest exposure in the batch.
pub struct AggregatedTransmissionModel {
    transmissibility: f32,
    rng: Mutex<ModelRng>,
}

impl AggregatedTransmissionModel {
    /// `transmissibility` must lie in `[0, 1]`.
    pub fn new(transmissibility: f32, rng: ModelRng) -> ModelResult<Self> {
        if !(0.0..=1.0).contains(&transmissibility) {
            return Err(ModelError::InvalidTransmissibility(transmissibility));
        }
        Ok(AggregatedTransmissionModel {
            transmissibility,
            rng: Mutex::new(rng),
        })
    }

    fn dose_sum(exposures: &[&Exposure]) -> f64 {
        exposures
            .iter()
            .map(|e| {
                let hours = e.micro_exposure_minutes() as f64 / 60.0;
                (e.infectivity as f64 * e.symptom_factor as f64 * hours).ln_1p()
            })
            .sum()
    }
}

impl TransmissionModel for AggregatedTransmissionModel {
    fn infection_outcome(&self, exposures: &[&Exposure]) -> HealthTransition {
        if exposures.is_empty() {
            return HealthTransition::unscheduled(HealthState::Susceptible);
        }
        let probability = 1.0 - (-(self.transmissibility as f64) * Self::dose_sum(exposures)).exp();

        let infected = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen_bool(probability)
        };
        if !infected {
            return HealthTransition::unscheduled(HealthState::Susceptible);
        }

        let time = exposures
            .iter()
            .map(|e| e.end_time())
            .max()
            .unwrap_or(SimTime::EPOCH);
        HealthTransition {
            time,
            health_state: HealthState::Exposed,
        }
    }
}
