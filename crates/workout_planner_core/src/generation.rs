//! Anthropic-on-Bedrock request and response envelopes.
//!
//! The invoker adapter only moves bytes; everything that decides what those
//! bytes contain lives here so it can be exercised without AWS.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::contract::{GenerationParameters, ANTHROPIC_BEDROCK_VERSION};

#[derive(Debug, Serialize)]
struct InvokeModelBody<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: [TextBlock<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeModelResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    text: Option<String>,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed model response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model response contained no content blocks")]
    EmptyContent,
    #[error("first model content block has no text")]
    MissingText,
}

/// Serialize the single-user-message invocation body for `prompt`.
pub fn build_invoke_body(
    prompt: &str,
    parameters: &GenerationParameters,
) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&InvokeModelBody {
        anthropic_version: ANTHROPIC_BEDROCK_VERSION,
        max_tokens: parameters.max_tokens,
        temperature: parameters.temperature,
        top_p: parameters.top_p,
        messages: [UserMessage {
            role: "user",
            content: [TextBlock {
                kind: "text",
                text: prompt,
            }],
        }],
    })
}

/// Pull `content[0].text` out of a model response body.
pub fn extract_generated_text(body: &[u8]) -> Result<String, EnvelopeError> {
    let response: InvokeModelResponse = serde_json::from_slice(body)?;
    let first = response
        .content
        .into_iter()
        .next()
        .ok_or(EnvelopeError::EmptyContent)?;
    first.text.ok_or(EnvelopeError::MissingText)
}

/// Parse generated text as the JSON workout plan, tolerating one Markdown fence.
pub fn parse_workout_plan(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(inner) = trimmed
        .strip_prefix("```json")
        .and_then(|after| after.strip_suffix("```"))
    {
        return inner.trim();
    }
    if let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|after| after.strip_suffix("```"))
    {
        return inner.trim();
    }

    trimmed
}
