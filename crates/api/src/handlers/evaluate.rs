//! Stub evaluation receiver.
//!
//! Stands in for the external evaluation backend during local development:
//! logs whatever JSON object it receives and acknowledges it. Payloads that
//! deviate from the evaluation contract are logged, not rejected.

use advisor_core::payload::EvaluationRequest;
use axum::body::Bytes;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Acknowledgement body.
#[derive(Debug, Serialize)]
pub struct EvaluateReply {
    pub status: &'static str,
}

/// POST /evaluate
///
/// Accepts any JSON object and answers `{"status":"received"}`.
pub async fn receive_evaluation(body: Bytes) -> AppResult<Json<EvaluateReply>> {
    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;
    if !payload.is_object() {
        return Err(AppError::BadRequest(
            "payload must be a JSON object".to_string(),
        ));
    }

    tracing::info!(payload = %payload, "Received evaluation request");

    match serde_json::from_value::<EvaluationRequest>(payload) {
        Ok(request) => match request.validate() {
            Ok(()) => tracing::debug!(listing = %request.url, "Payload matches the evaluation contract"),
            Err(errors) => tracing::warn!(listing = %request.url, errors = %errors, "Payload violates request invariants"),
        },
        Err(e) => tracing::warn!(error = %e, "Payload does not match the evaluation contract"),
    }

    Ok(Json(EvaluateReply { status: "received" }))
}
