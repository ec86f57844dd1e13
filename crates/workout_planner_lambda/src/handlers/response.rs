use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::WorkoutError;

pub const PREFLIGHT_MESSAGE: &str = "CORS preflight check successful";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";

const CORS_HEADERS: [(&str, &str); 7] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST,GET"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,Authorization,Access-Control-Allow-Origin",
    ),
    ("Access-Control-Allow-Credentials", "true"),
    ("Access-Control-Expose-Headers", "*"),
    ("Access-Control-Max-Age", "300"),
    ("Content-Type", "application/json"),
];

const ORIGIN_ONLY_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Content-Type", "application/json"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub fn preflight_response() -> ApiGatewayResponse {
    build_response(
        200,
        &CORS_HEADERS,
        json!({ "message": PREFLIGHT_MESSAGE }),
    )
}

pub fn method_not_allowed_response() -> ApiGatewayResponse {
    build_response(
        405,
        &ORIGIN_ONLY_HEADERS,
        json!({ "error": METHOD_NOT_ALLOWED_MESSAGE }),
    )
}

pub fn plan_response(plan: &Value) -> ApiGatewayResponse {
    build_response(200, &CORS_HEADERS, plan)
}

pub fn error_response(error: &WorkoutError) -> ApiGatewayResponse {
    build_response(
        error.status_code(),
        &CORS_HEADERS,
        json!({ "error": error.to_string() }),
    )
}

fn build_response(
    status_code: u16,
    headers: &[(&str, &str)],
    payload: impl std::fmt::Display,
) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        body: payload.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use workout_planner_core::contract::ValidationError;

    use super::*;

    #[test]
    fn preflight_carries_full_cors_set() {
        let response = preflight_response();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers.len(), 7);
        assert_eq!(response.headers["Access-Control-Max-Age"], "300");
        assert_eq!(response.headers["Access-Control-Expose-Headers"], "*");
        assert_eq!(
            response.body_json().expect("body should be JSON"),
            json!({"message": "CORS preflight check successful"})
        );
    }

    #[test]
    fn method_not_allowed_carries_origin_only() {
        let response = method_not_allowed_response();

        assert_eq!(response.status_code, 405);
        assert_eq!(response.headers.len(), 2);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert!(!response
            .headers
            .contains_key("Access-Control-Allow-Methods"));
        assert_eq!(response.body, r#"{"error":"Method Not Allowed"}"#);
    }

    #[test]
    fn error_response_uses_error_status_and_message() {
        let error = WorkoutError::from(ValidationError::MissingFields {
            fields: vec!["age"],
        });
        let response = error_response(&error);

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.headers["Access-Control-Allow-Methods"],
            "OPTIONS,POST,GET"
        );
        assert_eq!(
            response.body_json().expect("body should be JSON"),
            json!({"error": "Input handling error: Missing required fields: age"})
        );
    }

    #[test]
    fn serializes_with_api_gateway_field_names() {
        let value = serde_json::to_value(method_not_allowed_response()).expect("serializable");
        assert_eq!(value["statusCode"], 405);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
    }
}
