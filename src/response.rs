//! Uniform response envelope helpers.
//!
//! Every response, success or error, carries the same shape:
//! `{response_code, message, count, service_message, data}`.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use serde_json::Value;

/// Non-standard success codes the API reports for write operations.
pub const CODE_UPDATED: u16 = 209;
pub const CODE_DELETED: u16 = 210;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response_code: u16,
    pub message: String,
    pub count: u64,
    pub service_message: String,
    pub data: T,
}

fn respond<T: Serialize>(code: u16, message: &str, count: u64, service_message: &str, data: T) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::OK);
    (
        status,
        Json(Envelope {
            response_code: code,
            message: message.to_string(),
            count,
            service_message: service_message.to_string(),
            data,
        }),
    )
        .into_response()
}

/// 200 OK with a single entity.
pub fn success<T: Serialize>(data: T, service_message: &str) -> Response {
    respond(200, "OK", 1, service_message, data)
}

/// 200 OK with a row list; count is the number of rows returned.
pub fn success_list<T: Serialize>(data: Vec<T>, service_message: &str) -> Response {
    let count = data.len() as u64;
    respond(200, "OK", count, service_message, data)
}

/// 201 with the created entity.
pub fn created<T: Serialize>(data: T, service_message: &str) -> Response {
    respond(201, "created", 1, service_message, data)
}

/// 209 with the updated entity.
pub fn updated<T: Serialize>(data: T, service_message: &str) -> Response {
    respond(CODE_UPDATED, "updated", 1, service_message, data)
}

/// 210, data is always null.
pub fn deleted(service_message: &str) -> Response {
    respond(CODE_DELETED, "deleted", 1, service_message, Value::Null)
}

/// Error envelope: count 0, data null.
pub fn error(code: u16, message: &str, service_message: &str) -> Response {
    respond(code, message, 0, service_message, Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_all_fields() {
        let env = Envelope {
            response_code: 201,
            message: "created".to_string(),
            count: 1,
            service_message: "Product created successfully".to_string(),
            data: serde_json::json!({"id": 1}),
        };
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["response_code"], 201);
        assert_eq!(v["message"], "created");
        assert_eq!(v["count"], 1);
        assert_eq!(v["service_message"], "Product created successfully");
        assert_eq!(v["data"]["id"], 1);
    }

    #[test]
    fn write_codes_are_reportable_statuses() {
        assert!(StatusCode::from_u16(CODE_UPDATED).is_ok());
        assert!(StatusCode::from_u16(CODE_DELETED).is_ok());
    }
}
