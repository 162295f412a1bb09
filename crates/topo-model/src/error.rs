use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid pod template: {0}")]
    InvalidTemplate(String),

    #[error("pod template key '{key}' not found in config map '{config_map}'")]
    TemplateNotFound { config_map: String, key: String },
}

pub type ModelResult<T> = Result<T, ModelError>;
