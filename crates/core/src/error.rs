use thiserror::Error;

pub type PricingResult<T> = Result<T, PricingError>;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Stale pricing override: {0}")]
    InvalidOverride(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PricingError {
    /// Shorthand for a `NotFound` against a catalog entity.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
