use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use workout_planner_core::contract::ExerciseRecord;

use crate::config::CatalogSettings;

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

pub trait ExerciseCatalog {
    fn exercises_for_body_part(&self, body_part: &str)
        -> Result<Vec<ExerciseRecord>, CatalogError>;
}

/// Errors encountered while talking to the exercise catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog base URL '{url}': {message}")]
    BaseUrl { url: String, message: String },
    #[error("failed to build catalog HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request for body part '{body_part}' failed: {source}")]
    Http {
        body_part: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("catalog returned status {status} for body part '{body_part}'")]
    Status { body_part: String, status: u16 },
    #[error("catalog returned malformed exercises for body part '{body_part}': {source}")]
    Json {
        body_part: String,
        #[source]
        source: serde_json::Error,
    },
}

/// ExerciseDB client authenticated with RapidAPI key and host headers.
#[derive(Debug)]
pub struct RapidApiExerciseCatalog {
    client: Client,
    base_url: Url,
    api_key: Secret<String>,
    host: String,
}

impl RapidApiExerciseCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&settings.base_url).map_err(|error| CatalogError::BaseUrl {
            url: settings.base_url.clone(),
            message: error.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::BaseUrl {
                url: settings.base_url,
                message: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder().build().map_err(CatalogError::Client)?;
        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key,
            host: settings.host,
        })
    }

    /// `{base}/exercises/bodyPart/{body_part}` with the body part encoded as one segment.
    pub fn body_part_url(&self, body_part: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["exercises", "bodyPart", body_part]);
        }
        url
    }

    async fn fetch(&self, body_part: &str) -> Result<Vec<ExerciseRecord>, CatalogError> {
        let response = self
            .client
            .get(self.body_part_url(body_part))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(API_HOST_HEADER, &self.host)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                body_part: body_part.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                body_part: body_part.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| CatalogError::Http {
            body_part: body_part.to_string(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| CatalogError::Json {
            body_part: body_part.to_string(),
            source,
        })
    }
}

impl ExerciseCatalog for RapidApiExerciseCatalog {
    fn exercises_for_body_part(
        &self,
        body_part: &str,
    ) -> Result<Vec<ExerciseRecord>, CatalogError> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.fetch(body_part))
        })
    }
}
