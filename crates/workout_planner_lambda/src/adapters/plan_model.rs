use thiserror::Error;
use workout_planner_core::generation::EnvelopeError;

/// Hosted generative model that turns a prompt into plan text.
pub trait PlanModel {
    fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to encode model request: {0}")]
    Request(#[from] serde_json::Error),
    #[error("{0}")]
    Invocation(String),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}
