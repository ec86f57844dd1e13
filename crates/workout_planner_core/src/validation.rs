use serde_json::{Map, Value};

use crate::contract::{UserProfile, ValidationError, INTEGER_FIELDS, REQUIRED_FIELDS};

/// Parse and validate a raw request body into a [`UserProfile`].
///
/// An absent body is treated as an empty object, so it fails with every
/// required field listed as missing.
pub fn validate_profile(body: Option<&str>) -> Result<UserProfile, ValidationError> {
    let payload: Value = match body {
        Some(text) => serde_json::from_str(text).map_err(|error| {
            ValidationError::malformed(format!("Malformed JSON body: {error}"))
        })?,
        None => Value::Object(Map::new()),
    };

    let Some(object) = payload.as_object() else {
        return Err(ValidationError::malformed(
            "Request body must be a JSON object",
        ));
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    let mut integers = [0i64; INTEGER_FIELDS.len()];
    for (slot, field) in integers.iter_mut().zip(INTEGER_FIELDS) {
        *slot = coerce_integer(&object[field]).ok_or(ValidationError::NonIntegerField)?;
    }
    let [age, weight, height_feet, height_inches, workout_time] = integers;

    Ok(UserProfile {
        age,
        weight,
        height_feet,
        height_inches,
        sex: string_field(object, "sex")?,
        workout_time,
        fitness_level: string_field(object, "fitnessLevel")?,
        body_areas: string_list_field(object, "bodyAreas")?,
        muscle_groups: string_list_field(object, "muscleGroups")?,
    })
}

/// Integer coercion accepted for numeric profile fields: integers, finite
/// floats within `i64` range (truncated), booleans, and strings holding a
/// signed base-10 integer.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            // 2^63 is exactly representable, so the upper bound is exclusive.
            number
                .as_f64()
                .filter(|float| *float >= i64::MIN as f64 && *float < i64::MAX as f64)
                .map(|float| float.trunc() as i64)
        }),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::malformed(format!("{field} must be a string")))
}

fn string_list_field(
    object: &Map<String, Value>,
    field: &str,
) -> Result<Vec<String>, ValidationError> {
    let invalid = || ValidationError::malformed(format!("{field} must be a list of strings"));
    let values = object.get(field).and_then(Value::as_array).ok_or_else(invalid)?;

    values
        .iter()
        .map(|value| value.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}
