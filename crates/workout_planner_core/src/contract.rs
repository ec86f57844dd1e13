use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const ANTHROPIC_BEDROCK_VERSION: &str = "bedrock-2023-05-31";
pub const DEFAULT_MAX_TOKENS: u32 = 2_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.9;

/// Body fields a planning request must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "age",
    "weight",
    "heightFeet",
    "heightInches",
    "sex",
    "workoutTime",
    "fitnessLevel",
    "bodyAreas",
    "muscleGroups",
];

/// Fields coerced to integers during validation.
pub const INTEGER_FIELDS: [&str; 5] = [
    "age",
    "weight",
    "heightFeet",
    "heightInches",
    "workoutTime",
];

/// A validated fitness profile, as produced by [`crate::validation::validate_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub age: i64,
    pub weight: i64,
    pub height_feet: i64,
    pub height_inches: i64,
    pub sex: String,
    pub workout_time: i64,
    pub fitness_level: String,
    pub body_areas: Vec<String>,
    pub muscle_groups: Vec<String>,
}

impl UserProfile {
    /// Exact for every pair of `i64` inputs, so validated extremes never wrap.
    pub fn total_height_inches(&self) -> i128 {
        i128::from(self.height_feet) * 12 + i128::from(self.height_inches)
    }
}

/// One entry of the exercise catalog response. Other catalog attributes are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseRecord {
    pub name: String,
    pub target: String,
}

/// Sampling parameters sent with every model invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationParameters {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("Age, weight, feet, inches, and workout time must be integers")]
    NonIntegerField,
    #[error("{0}")]
    Malformed(String),
}

impl ValidationError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// Hex SHA-256 of the rendered prompt, used to correlate identical requests in logs.
pub fn prompt_fingerprint(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_joins_names() {
        let error = ValidationError::MissingFields {
            fields: vec!["age", "sex"],
        };
        assert_eq!(error.to_string(), "Missing required fields: age, sex");
    }

    #[test]
    fn total_height_combines_feet_and_inches() {
        let profile = UserProfile {
            age: 30,
            weight: 180,
            height_feet: 5,
            height_inches: 11,
            sex: "male".to_string(),
            workout_time: 45,
            fitness_level: "beginner".to_string(),
            body_areas: vec!["back".to_string()],
            muscle_groups: vec!["lats".to_string()],
        };
        assert_eq!(profile.total_height_inches(), 71);
    }

    #[test]
    fn prompt_fingerprint_is_stable_hex() {
        let first = prompt_fingerprint("same prompt");
        let second = prompt_fingerprint("same prompt");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, prompt_fingerprint("other prompt"));
    }
}
