use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tracing::{error, info};
use workout_planner_core::contract::{prompt_fingerprint, ValidationError};
use workout_planner_core::enrichment::collect_exercise_names;
use workout_planner_core::generation::parse_workout_plan;
use workout_planner_core::prompt::build_prompt;
use workout_planner_core::validation::validate_profile;

use crate::adapters::exercise_catalog::ExerciseCatalog;
use crate::adapters::plan_model::PlanModel;
use crate::error::WorkoutError;
use crate::handlers::response::{
    error_response, method_not_allowed_response, plan_response, preflight_response,
    ApiGatewayResponse,
};

const COMPONENT: &str = "workout_handler";

/// The parts of an API Gateway proxy event the handler reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiGatewayRequest {
    pub method: Option<String>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

impl ApiGatewayRequest {
    /// Accepts HTTP API (v2) and REST (v1) proxy payloads.
    pub fn from_event(event: &Value) -> Self {
        let method = event
            .pointer("/requestContext/http/method")
            .or_else(|| event.get("httpMethod"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let body = match event.get("body") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        let is_base64_encoded = event
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self {
            method,
            body,
            is_base64_encoded,
        }
    }

    pub fn decoded_body(&self) -> Result<Option<String>, ValidationError> {
        let Some(body) = &self.body else {
            return Ok(None);
        };
        if !self.is_base64_encoded {
            return Ok(Some(body.clone()));
        }

        let bytes = STANDARD.decode(body).map_err(|error| {
            ValidationError::malformed(format!("Invalid base64 body: {error}"))
        })?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|error| ValidationError::malformed(format!("Body is not UTF-8: {error}")))
    }
}

/// Route a raw API Gateway event and produce the proxy response.
pub fn handle_workout_event(
    event: Value,
    catalog: &dyn ExerciseCatalog,
    model: &dyn PlanModel,
) -> ApiGatewayResponse {
    let request = ApiGatewayRequest::from_event(&event);
    info!(
        component = COMPONENT,
        method = request.method.as_deref().unwrap_or(""),
        "request received"
    );

    match request.method.as_deref() {
        Some("OPTIONS") => return preflight_response(),
        Some("POST") => {}
        _ => return method_not_allowed_response(),
    }

    match generate_plan(&request, catalog, model) {
        Ok(plan) => {
            info!(component = COMPONENT, "plan generated");
            plan_response(&plan)
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                kind = failure.kind(),
                status = failure.status_code(),
                error = %failure,
                "request failed"
            );
            error_response(&failure)
        }
    }
}

/// validate → enrich → prompt → delegate → parse.
pub fn generate_plan(
    request: &ApiGatewayRequest,
    catalog: &dyn ExerciseCatalog,
    model: &dyn PlanModel,
) -> Result<Value, WorkoutError> {
    let body = request.decoded_body()?;
    let profile = validate_profile(body.as_deref())?;

    let exercises = collect_exercise_names(&profile.body_areas, &profile.muscle_groups, |area| {
        catalog.exercises_for_body_part(area)
    })?;
    info!(
        component = COMPONENT,
        body_areas = profile.body_areas.len(),
        exercises = exercises.len(),
        "exercises fetched"
    );

    let prompt = build_prompt(&profile, &exercises);
    info!(
        component = COMPONENT,
        prompt_fingerprint = %prompt_fingerprint(&prompt),
        prompt_chars = prompt.len(),
        "prompt built"
    );

    let text = model.generate(&prompt)?;
    parse_workout_plan(&text).map_err(WorkoutError::PlanFormat)
}
