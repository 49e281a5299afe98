use epi_events::HealthState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("transition diagram has no edges")]
    EmptyTransitionDiagram,

    #[error("edge {from} -> {to} has non-positive weight {weight}")]
    InvalidEdgeWeight {
        from: HealthState,
        to: HealthState,
        weight: f32,
    },

    #[error("edge {from} -> {to} has an invalid dwell distribution: {source}")]
    InvalidDwellDistribution {
        from: HealthState,
        to: HealthState,
        source: rand_distr::GammaError,
    },

    #[error("transmissibility {0} is outside [0, 1]")]
    InvalidTransmissibility(f32),
}

pub type ModelResult<T> = Result<T, ModelError>;
