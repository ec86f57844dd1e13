use thiserror::Error;
use workout_planner_core::contract::ValidationError;

use crate::adapters::exercise_catalog::CatalogError;
use crate::adapters::plan_model::ModelError;

/// Every way a planning request can fail, each with its own HTTP status.
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Input handling error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Exercise catalog request failed: {0}")]
    Upstream(#[from] CatalogError),
    #[error("Error generating workout plan: {0}")]
    Model(#[from] ModelError),
    #[error("Workout plan is not valid JSON: {0}")]
    PlanFormat(#[source] serde_json::Error),
}

impl WorkoutError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::PlanFormat(_) => 400,
            Self::Upstream(_) | Self::Model(_) => 502,
        }
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Upstream(_) => "upstream_error",
            Self::Model(_) => "model_error",
            Self::PlanFormat(_) => "plan_format_error",
        }
    }
}
