//! Visit generation from per-location duration samplers.

use epi_core::{LocationUuid, ModelRng, SimTime, Timestep};
use epi_events::Visit;
use epi_risk::RiskScore;

use crate::error::{VisitError, VisitResult};
use crate::generator::VisitGenerator;

/// Samples a raw dwell time in minutes, given the risk score's
/// `duration_adjustment` for the location.  The absolute scale is
/// irrelevant — samples are normalized against each other — only the
/// relative magnitudes matter.
pub type DurationSampler = Box<dyn FnMut(f32) -> f32 + Send>;

/// One entry of a [`DurationSpecifiedVisitGenerator`]'s itinerary.
pub struct LocationDuration {
    pub location_uuid: LocationUuid,
    pub sample_duration: DurationSampler,
}

/// Generates visits from an ordered list of `(location, duration sampler)`
/// entries.
///
/// Per timestep, each entry's visit survives with probability
/// `frequency_adjustment` (a Bernoulli draw) and gets a sampled raw
/// duration; the raw durations are then normalized so the visits tile the
/// timestep back-to-back in entry order.  If every entry drops out, the
/// agent spends the whole timestep at the first location — agents have to
/// be somewhere.
pub struct DurationSpecifiedVisitGenerator {
    entries: Vec<LocationDuration>,
    rng: ModelRng,
}

impl DurationSpecifiedVisitGenerator {
    pub fn new(entries: Vec<LocationDuration>, rng: ModelRng) -> VisitResult<Self> {
        if entries.is_empty() {
            return Err(VisitError::NoLocations);
        }
        Ok(DurationSpecifiedVisitGenerator { entries, rng })
    }
}

impl VisitGenerator for DurationSpecifiedVisitGenerator {
    fn generate_visits(
        &mut self,
        timestep: &Timestep,
        risk_score: &dyn RiskScore,
        visits: &mut Vec<Visit>,
    ) {
        let mut durations = Vec::with_capacity(self.entries.len());
        for entry in &mut self.entries {
            let adjustment = risk_score.visit_adjustment(timestep, entry.location_uuid);
            if !self.rng.gen_bool(adjustment.frequency_adjustment as f64) {
                durations.push(0.0f32);
            } else {
                let sample = (entry.sample_duration)(adjustment.duration_adjustment);
                durations.push(sample.max(0.0));
            }
        }

        let mut normalizer: f32 = durations.iter().sum();
        if normalizer == 0.0 {
            durations[0] = 1.0;
            normalizer = 1.0;
        }

        let mut start_time = timestep.start();
        let last = self.entries.len() - 1;
        for (i, entry) in self.entries.iter().enumerate() {
            let end_time = if i == last {
                timestep.end()
            } else {
                SimTime::min(
                    timestep.end(),
                    start_time + timestep.duration().mul_f32(durations[i] / normalizer),
                )
            };
            if end_time <= start_time {
                continue;
            }
            visits.push(Visit {
                location_uuid: entry.location_uuid,
                start_time,
                end_time,
                ..Visit::default()
            });
            start_time = end_time;
        }
    }
}
