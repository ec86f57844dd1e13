pub mod exercise_catalog;
pub mod plan_model;
