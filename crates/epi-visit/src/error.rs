use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisitError {
    #[error("visit generator needs at least one location entry")]
    NoLocations,
}

pub type VisitResult<T> = Result<T, VisitError>;
