use thiserror::Error;

use crate::error::CoreError;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("package upload failed: {0}")]
    Upload(String),

    #[error(transparent)]
    Assembly(#[from] CoreError),

    #[error("descriptor submission failed: {0}")]
    Submit(String),
}
