use axum::{extract::State, http::StatusCode};
use serde_json::Value;
use std::sync::Arc;

use super::envelope::InvocationResponse;
use crate::{
    domain::tts::{
        SynthesisPayload, SynthesisRequest, SynthesisResponse, TtsServiceApi, MAX_TEXT_LENGTH,
    },
    error::{AppError, AppResult},
};

pub const SUCCESS_MESSAGE: &str = "Speech synthesis completed successfully";

/// Validates inbound envelopes and maps synthesis outcomes to response envelopes
pub struct TtsController {
    tts_service: Arc<dyn TtsServiceApi>,
}

impl TtsController {
    pub fn new(tts_service: Arc<dyn TtsServiceApi>) -> Self {
        Self { tts_service }
    }

    /// Handle one invocation envelope.
    ///
    /// Accepts either `{"body": "<json string>"}` (gateway style) or the payload
    /// object itself (direct invocation). Never fails: every outcome becomes a
    /// 200, 400 or 500 envelope.
    pub async fn handle(&self, envelope: Value) -> InvocationResponse {
        match self.process(envelope).await {
            Ok(response) => InvocationResponse::json(StatusCode::OK, &response),
            Err(err) => {
                let status = err.status_code();
                if err.is_client_error() {
                    tracing::warn!(
                        error = %err,
                        status = %status.as_u16(),
                        "Validation error"
                    );
                } else {
                    tracing::error!(
                        error = ?err,
                        error_display = %err,
                        status = %status.as_u16(),
                        "Request failed"
                    );
                }
                InvocationResponse::json(status, &err.to_response())
            }
        }
    }

    /// POST /synthesize - raw request body treated like a gateway proxy envelope
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        body: String,
    ) -> InvocationResponse {
        controller.handle(serde_json::json!({ "body": body })).await
    }

    async fn process(&self, envelope: Value) -> AppResult<SynthesisResponse> {
        let payload = Self::parse_payload(envelope)?;
        let request = Self::validate(payload)?;

        let voice_id = request.voice_id().to_string();
        let output_format = request.output_format().to_string();

        let result = self
            .tts_service
            .synthesize(request)
            .await
            .map_err(AppError::from)?;

        Ok(SynthesisResponse {
            message: SUCCESS_MESSAGE.to_string(),
            voice_id,
            output_format,
            local_path: result.local_path,
            s3_url: result.storage_url,
        })
    }

    /// Normalize gateway and direct invocations to the inner payload
    fn parse_payload(envelope: Value) -> AppResult<SynthesisPayload> {
        let gateway_body = envelope
            .get("body")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let payload = match gateway_body {
            Some(body) => serde_json::from_str::<Value>(&body)
                .map_err(|e| AppError::InvalidPayload(e.to_string()))?,
            None => envelope,
        };

        serde_json::from_value(payload).map_err(|e| AppError::InvalidPayload(e.to_string()))
    }

    fn validate(payload: SynthesisPayload) -> AppResult<SynthesisRequest> {
        let storage_key = payload.key();

        let text = match payload.text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(AppError::MissingParameter),
        };

        let char_count = text.chars().count();
        if char_count > MAX_TEXT_LENGTH {
            return Err(AppError::LengthExceeded {
                max: MAX_TEXT_LENGTH,
                actual: char_count,
            });
        }

        Ok(SynthesisRequest::new(
            text,
            payload.voice_id,
            payload.output_format,
            storage_key,
        ))
    }
}
