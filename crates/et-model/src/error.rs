use thiserror::Error;

use et_core::ConfigError;
use et_town::TownError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Town(#[from] TownError),
}

pub type ModelResult<T> = Result<T, ModelError>;
