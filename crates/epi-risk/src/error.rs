use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("positive threshold {0} is outside [0, 1]")]
    InvalidPositiveThreshold(f32),

    #[error("{0} must be non-negative")]
    NegativeDuration(&'static str),
}

pub type RiskResult<T> = Result<T, RiskError>;
