use secrecy::Secret;
use thiserror::Error;
use workout_planner_core::contract::GenerationParameters;

pub const DEFAULT_EXERCISE_API_HOST: &str = "exercisedb.p.rapidapi.com";
pub const DEFAULT_EXERCISE_API_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";
pub const DEFAULT_BEDROCK_REGION: &str = "us-west-2";
pub const DEFAULT_BEDROCK_MODEL_ID: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";

/// Immutable runtime configuration, read once at cold start.
#[derive(Debug)]
pub struct WorkoutPlannerConfig {
    pub catalog: CatalogSettings,
    pub model: ModelSettings,
}

#[derive(Debug)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub region: String,
    pub model_id: String,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{key} has invalid value '{value}': {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl WorkoutPlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let read_or =
            |key: &str, default: &str| read(key).unwrap_or_else(|| default.to_string());

        let api_key =
            read("EXERCISE_API_KEY").ok_or(ConfigError::Missing("EXERCISE_API_KEY"))?;

        let defaults = GenerationParameters::default();
        let parameters = GenerationParameters {
            max_tokens: parse_or("BEDROCK_MAX_TOKENS", &read, defaults.max_tokens)?,
            temperature: parse_finite_or("BEDROCK_TEMPERATURE", &read, defaults.temperature)?,
            top_p: parse_finite_or("BEDROCK_TOP_P", &read, defaults.top_p)?,
        };

        Ok(Self {
            catalog: CatalogSettings {
                base_url: read_or("EXERCISE_API_BASE_URL", DEFAULT_EXERCISE_API_BASE_URL),
                api_key: Secret::new(api_key),
                host: read_or("EXERCISE_API_HOST", DEFAULT_EXERCISE_API_HOST),
            },
            model: ModelSettings {
                region: read_or("BEDROCK_REGION", DEFAULT_BEDROCK_REGION),
                model_id: read_or("BEDROCK_MODEL_ID", DEFAULT_BEDROCK_MODEL_ID),
                parameters,
            },
        })
    }
}

fn parse_or<T>(
    key: &'static str,
    read: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = read(key) else {
        return Ok(default);
    };
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(error) => Err(ConfigError::Invalid {
            key,
            message: error.to_string(),
            value,
        }),
    }
}

/// Sampling values must survive JSON encoding, which has no NaN or infinity.
fn parse_finite_or(
    key: &'static str,
    read: &impl Fn(&str) -> Option<String>,
    default: f32,
) -> Result<f32, ConfigError> {
    let parsed = parse_or(key, read, default)?;
    if parsed.is_finite() {
        return Ok(parsed);
    }
    Err(ConfigError::Invalid {
        key,
        value: read(key).unwrap_or_default(),
        message: "must be a finite number".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn applies_defaults_when_only_api_key_is_set() {
        let config =
            WorkoutPlannerConfig::from_lookup(lookup_from(&[("EXERCISE_API_KEY", "k-123")]))
                .expect("config should load");

        assert_eq!(config.catalog.api_key.expose_secret(), "k-123");
        assert_eq!(config.catalog.host, DEFAULT_EXERCISE_API_HOST);
        assert_eq!(config.catalog.base_url, DEFAULT_EXERCISE_API_BASE_URL);
        assert_eq!(config.model.region, "us-west-2");
        assert_eq!(config.model.model_id, DEFAULT_BEDROCK_MODEL_ID);
        assert_eq!(config.model.parameters, GenerationParameters::default());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let error =
            WorkoutPlannerConfig::from_lookup(lookup_from(&[("EXERCISE_API_KEY", "  ")]))
                .expect_err("blank key should fail");
        assert_eq!(error, ConfigError::Missing("EXERCISE_API_KEY"));
        assert_eq!(error.to_string(), "EXERCISE_API_KEY must be configured");
    }

    #[test]
    fn overrides_are_applied() {
        let config = WorkoutPlannerConfig::from_lookup(lookup_from(&[
            ("EXERCISE_API_KEY", "k"),
            ("EXERCISE_API_BASE_URL", "http://localhost:9000"),
            ("BEDROCK_REGION", "eu-central-1"),
            ("BEDROCK_MAX_TOKENS", "1024"),
            ("BEDROCK_TOP_P", "0.5"),
        ]))
        .expect("config should load");

        assert_eq!(config.catalog.base_url, "http://localhost:9000");
        assert_eq!(config.model.region, "eu-central-1");
        assert_eq!(config.model.parameters.max_tokens, 1024);
        assert_eq!(config.model.parameters.top_p, 0.5);
    }

    #[test]
    fn unparsable_override_is_rejected() {
        let error = WorkoutPlannerConfig::from_lookup(lookup_from(&[
            ("EXERCISE_API_KEY", "k"),
            ("BEDROCK_TEMPERATURE", "warm"),
        ]))
        .expect_err("invalid temperature should fail");

        assert!(matches!(
            error,
            ConfigError::Invalid {
                key: "BEDROCK_TEMPERATURE",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_sampling_values_are_rejected() {
        for (key, value) in [
            ("BEDROCK_TEMPERATURE", "NaN"),
            ("BEDROCK_TEMPERATURE", "inf"),
            ("BEDROCK_TOP_P", "-infinity"),
        ] {
            let error = WorkoutPlannerConfig::from_lookup(lookup_from(&[
                ("EXERCISE_API_KEY", "k"),
                (key, value),
            ]))
            .expect_err("non-finite value should fail");

            assert_eq!(
                error,
                ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                    message: "must be a finite number".to_string(),
                }
            );
        }
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = WorkoutPlannerConfig::from_lookup(lookup_from(&[(
            "EXERCISE_API_KEY",
            "super-secret",
        )]))
        .expect("config should load");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
