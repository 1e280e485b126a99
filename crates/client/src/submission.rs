//! Submission client for the evaluation backend's `POST /evaluate` endpoint.
//!
//! One request per submission. Failures are reported, never retried.

use advisor_core::form::StatusLine;
use advisor_core::payload::EvaluationRequest;
use serde::Deserialize;

/// Path of the evaluation endpoint, relative to the backend base URL.
pub const EVALUATE_PATH: &str = "/evaluate";

/// Shown when the backend answers without a usable `status`.
const DEFAULT_BACKEND_STATUS: &str = "ok";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a submission did not succeed. The `Display` text is the user-facing
/// status message.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request never reached the backend (DNS, refused, TLS, ...).
    #[error("Failed to reach backend: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend error: HTTP {0}")]
    Backend(u16),
}

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// Optional body of a successful response. Any other shape counts as absent.
#[derive(Debug, Deserialize)]
struct BackendReply {
    status: Option<String>,
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub http_status: u16,
    /// `status` field of the response body, when present and well-formed.
    pub backend_status: Option<String>,
}

impl SubmitReceipt {
    pub fn message(&self) -> String {
        format!(
            "Sent to backend ({}). Check the backend log for the received JSON.",
            self.backend_status
                .as_deref()
                .unwrap_or(DEFAULT_BACKEND_STATUS)
        )
    }
}

/// Map a submission outcome to the status line shown on the form.
pub fn status_line(outcome: &Result<SubmitReceipt, SubmitError>) -> StatusLine {
    match outcome {
        Ok(receipt) => StatusLine {
            success: true,
            message: receipt.message(),
        },
        Err(e) => StatusLine {
            success: false,
            message: e.to_string(),
        },
    }
}

/// Extract `status` from a response body, tolerating anything malformed.
pub fn parse_backend_status(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<BackendReply>(body)
        .ok()
        .and_then(|reply| reply.status)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for a single evaluation backend.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
    backend_url: String,
}

impl SubmissionClient {
    /// Create a client with reqwest defaults (no request timeout).
    ///
    /// * `backend_url` - Base URL, e.g. `http://127.0.0.1:8000`.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), backend_url)
    }

    /// Create a client reusing a pre-configured [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, backend_url: impl Into<String>) -> Self {
        Self {
            client,
            backend_url: backend_url.into(),
        }
    }

    /// Full URL of the evaluation endpoint.
    pub fn evaluate_url(&self) -> String {
        format!(
            "{}{EVALUATE_PATH}",
            self.backend_url.trim_end_matches('/')
        )
    }

    /// POST `request` as JSON and interpret the response.
    pub async fn submit(&self, request: &EvaluationRequest) -> Result<SubmitReceipt, SubmitError> {
        let url = self.evaluate_url();
        tracing::debug!(url = %url, listing = %request.url, "Submitting evaluation request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Backend unreachable");
                SubmitError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Backend rejected evaluation request");
            return Err(SubmitError::Backend(status.as_u16()));
        }

        let backend_status = match response.bytes().await {
            Ok(body) => parse_backend_status(&body),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read backend response body");
                None
            }
        };

        tracing::info!(
            status = status.as_u16(),
            backend_status = backend_status.as_deref().unwrap_or(DEFAULT_BACKEND_STATUS),
            "Evaluation request delivered"
        );

        Ok(SubmitReceipt {
            http_status: status.as_u16(),
            backend_status,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
