//! Handler for the standalone results page.

use advisor_core::error::CoreError;
use advisor_core::results::{ProgressRing, MOCK_MATCH_PERCENT};
use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

use crate::error::AppResult;
use crate::views;

/// Query parameters for the results page.
#[derive(Debug, Deserialize)]
pub struct ResultsParams {
    /// Match percentage; out-of-range values are clamped, not rejected.
    pub score: Option<String>,
}

/// GET /results?score=N
///
/// Render the progress ring for `score`, or for the mock score when absent.
pub async fn show_results(Query(params): Query<ResultsParams>) -> AppResult<Html<String>> {
    let score = match params.score.as_deref().map(str::trim) {
        None | Some("") => MOCK_MATCH_PERCENT,
        Some(raw) => raw.parse::<f64>().map_err(|_| {
            CoreError::Validation(format!("score must be a number, got '{raw}'"))
        })?,
    };

    let ring = ProgressRing::new(score);
    tracing::debug!(requested = score, shown = ring.percent(), "Rendering results");
    Ok(Html(views::results::render_results(&ring, &[], None)))
}
