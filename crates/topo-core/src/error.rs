use thiserror::Error;
use topo_model::ModelError;

use crate::merge::MergeError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("baseline provider '{provider}' failed: {reason}")]
    Baseline {
        provider: &'static str,
        reason: String,
    },
}
