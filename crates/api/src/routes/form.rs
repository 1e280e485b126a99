//! Route definitions for the form and results pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{form, results};
use crate::state::AppState;

/// ```text
/// GET    /         -> show_form
/// GET    /results  -> show_results  (?score)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::show_form))
        .route("/results", get(results::show_results))
}

/// ```text
/// POST   /submit   -> submit_form   (application/x-www-form-urlencoded)
/// ```
///
/// Mounted outside the inbound request timeout: the backend call is bounded
/// by `BACKEND_TIMEOUT_SECS` alone.
pub fn submit_router() -> Router<AppState> {
    Router::new().route("/submit", post(form::submit_form))
}
