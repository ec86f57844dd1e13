//! AWS-oriented adapters and handlers for the workout planner Lambda.
//!
//! This crate owns runtime integration details (API Gateway event handling,
//! CORS envelopes, configuration, and the exercise catalog client) and keeps
//! the model invoker behind a trait so the Bedrock client stays in the binary.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
