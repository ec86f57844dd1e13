//! Shared workout planner domain primitives.
//!
//! This crate owns the deterministic parts of the planning pipeline: the
//! request contract, profile validation, exercise selection, prompt rendering,
//! and the generative-model request/response envelope. It intentionally
//! excludes AWS SDK, HTTP client, and Lambda runtime concerns.

pub mod contract;
pub mod enrichment;
pub mod generation;
pub mod prompt;
pub mod validation;
