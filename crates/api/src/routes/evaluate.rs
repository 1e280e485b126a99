//! Route definition for the stub evaluation receiver.

use axum::routing::post;
use axum::Router;

use crate::handlers::evaluate;
use crate::state::AppState;

/// ```text
/// POST   /evaluate -> receive_evaluation
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/evaluate", post(evaluate::receive_evaluation))
}
