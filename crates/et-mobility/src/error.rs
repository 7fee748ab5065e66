use et_town::TownError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("routing failed: {0}")]
    Routing(#[from] TownError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
