//! Uniform visit generation over a plain list of locations.

use epi_core::{LocationUuid, ModelRng, Timestep};
use epi_events::Visit;
use epi_risk::RiskScore;

use crate::duration::{DurationSpecifiedVisitGenerator, LocationDuration};
use crate::error::VisitResult;
use crate::generator::VisitGenerator;

const EPSILON: f32 = 1e-5;

/// A [`DurationSpecifiedVisitGenerator`] with uniform `(ε, adjustment − ε)`
/// duration samplers — the simplest itinerary over a set of locations, used
/// when no empirical dwell-time data is available.
///
/// Each location gets an independently forked RNG stream so the sampler
/// closures stay self-contained.
pub struct IndexedLocationVisitGenerator {
    inner: DurationSpecifiedVisitGenerator,
}

impl IndexedLocationVisitGenerator {
    pub fn new(location_uuids: &[LocationUuid], mut rng: ModelRng) -> VisitResult<Self> {
        let entries = location_uuids
            .iter()
            .enumerate()
            .map(|(i, &location_uuid)| {
                let mut sampler_rng = rng.fork(i as u64);
                LocationDuration {
                    location_uuid,
                    sample_duration: Box::new(move |adjustment: f32| {
                        let hi = (adjustment - EPSILON).max(2.0 * EPSILON);
                        sampler_rng.gen_range(EPSILON..hi)
                    }),
                }
            })
            .collect();
        Ok(IndexedLocationVisitGenerator {
            inner: DurationSpecifiedVisitGenerator::new(entries, rng)?,
        })
    }
}

impl VisitGenerator for IndexedLocationVisitGenerator {
    fn generate_visits(
        &mut self,
        timestep: &Timestep,
        risk_score: &dyn RiskScore,
        visits: &mut Vec<Visit>,
    ) {
        self.inner.generate_visits(timestep, risk_score, visits);
    }
}
