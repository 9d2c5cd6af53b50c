use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::INTERNAL_ERROR_MESSAGE;

/// Response envelope handed back to the invocation runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded business payload
    pub body: String,
}

impl InvocationResponse {
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize response body");
            serde_json::json!({ "error": INTERNAL_ERROR_MESSAGE }).to_string()
        });

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    /// Decode the JSON body, mostly useful to callers and tests
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Render the envelope as a plain HTTP response when serving over axum
impl IntoResponse for InvocationResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                header::HeaderName::try_from(name.as_str()),
                header::HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }

        response
    }
}
