use et_core::ConfigError;
use et_mobility::MobilityError;
use et_model::ModelError;
use et_output::OutputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("dispersal failed: {0}")]
    Mobility(#[from] MobilityError),

    #[error("output failed: {0}")]
    Output(#[from] OutputError),

    #[error("the run has already finished at timestep {0}")]
    Finished(u32),
}

pub type SimResult<T> = Result<T, SimError>;
