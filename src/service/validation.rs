//! Field-rule validation, applied after the payload shape has been
//! deserialized. Rules are static tables declared next to each entity.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Per-field constraints. `required` is only enforced by the full check.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub pattern: Option<&'static str>,
}

impl FieldRule {
    pub const NONE: FieldRule = FieldRule {
        required: false,
        min_length: None,
        max_length: None,
        minimum: None,
        maximum: None,
        pattern: None,
    };
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a body against per-field rules. Required fields must be
    /// present and non-null.
    pub fn validate(body: &Map<String, Value>, rules: &[(&str, FieldRule)]) -> Result<(), AppError> {
        for (field, rule) in rules {
            let val = body.get(*field);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
            if let Some(v) = val {
                validate_field(field, v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate only the fields present in the body (for update).
    /// Required is not enforced for missing fields.
    pub fn validate_partial(body: &Map<String, Value>, rules: &[(&str, FieldRule)]) -> Result<(), AppError> {
        for (field, rule) in rules {
            if let Some(v) = body.get(*field) {
                validate_field(field, v, rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(field: &str, v: &Value, rule: &FieldRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    if let Some(min) = rule.min_length {
        if let Some(s) = v.as_str() {
            if s.len() < min {
                return Err(AppError::Validation(format!(
                    "{} must be at least {} characters",
                    field, min
                )));
            }
        }
    }
    if let Some(max) = rule.max_length {
        if let Some(s) = v.as_str() {
            if s.len() > max {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    field, max
                )));
            }
        }
    }
    if let Some(min) = rule.minimum {
        if let Some(n) = v.as_f64() {
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
            }
        }
    }
    if let Some(max) = rule.maximum {
        if let Some(n) = v.as_f64() {
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", field, max)));
            }
        }
    }
    if let Some(pattern) = rule.pattern {
        let re = Regex::new(pattern)
            .map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
        if let Some(s) = v.as_str() {
            if !re.is_match(s) {
                return Err(AppError::Validation(format!(
                    "{} does not match the required pattern",
                    field
                )));
            }
        }
    }
    Ok(())
}
