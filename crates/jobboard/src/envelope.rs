//! Uniform response envelope.
//!
//! Every endpoint answers with `{statusCode, message, data}`. The status
//! code is mirrored into the body, and `data` is always a JSON structure:
//! payloads are converted to a `Value` here, `null` (and the unit type)
//! collapse to `[]`, and nothing is ever re-encoded as a string.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    pub fn new(status: StatusCode, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) | Err(_) => Value::Array(Vec::new()),
            Ok(value) => value,
        };

        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: impl Serialize) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: impl Serialize) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_data_collapses_to_array() {
        let envelope = Envelope::ok("Company deleted", ());
        assert_eq!(envelope.data, json!([]));
        assert_eq!(envelope.status_code, 200);
    }

    #[test]
    fn payloads_stay_structured() {
        let envelope = Envelope::created("Company created", json!({ "id": "abc" }));
        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.data, json!({ "id": "abc" }));
    }
}
