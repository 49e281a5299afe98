//! Per-minute distance-bucket exposure counts.
//!
//! An overlap of `d` minutes between two agents is recorded as minute counts
//! spread across distance buckets: the first `min(B, d)` buckets each
//! receive `d / bucketsFilled` minutes (integer division) and the rest stay
//! zero.  The derivation is fully deterministic so a location can reproduce
//! identical exposure pairs for both participants.

use epi_core::{SimDuration, SimTime};

use crate::records::Exposure;

/// Number of distance buckets an exposure's minutes are spread across.
pub const MICRO_EXPOSURE_BUCKETS: usize = 10;

/// Derive bucket counts from an overlap duration.
///
/// `total = floor(minutes(overlap))`; a zero-minute overlap yields all-zero
/// counts.  Each filled bucket gets `total / bucketsFilled`, saturating at
/// what a `u8` can hold (only reachable past 42 hours of overlap).
pub fn micro_exposure_counts(overlap: SimDuration) -> [u8; MICRO_EXPOSURE_BUCKETS] {
    let mut counts = [0u8; MICRO_EXPOSURE_BUCKETS];
    let total = overlap.whole_minutes().max(0) as u64;
    if total == 0 {
        return counts;
    }
    let buckets_to_fill = (MICRO_EXPOSURE_BUCKETS as u64).min(total) as usize;
    let per_bucket = (total / buckets_to_fill as u64).min(u8::MAX as u64) as u8;
    for count in counts.iter_mut().take(buckets_to_fill) {
        *count = per_bucket;
    }
    counts
}

// ── MicroExposureGenerator ────────────────────────────────────────────────────

/// Assembles complete [`Exposure`] records from overlap parameters.
///
/// Locations hold one of these and call it once per ordered pair of
/// overlapping visits.  `symptom_factor` is recorded on the exposure but
/// does not influence the bucket counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroExposureGenerator;

impl MicroExposureGenerator {
    pub fn generate(
        &self,
        start_time: SimTime,
        duration: SimDuration,
        infectivity: f32,
        symptom_factor: f32,
    ) -> Exposure {
        Exposure {
            start_time,
            duration,
            infectivity,
            symptom_factor,
            micro_exposure_counts: micro_exposure_counts(duration),
        }
    }
}
