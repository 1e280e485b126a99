//! Route tables. Handlers live in [`crate::handlers`].

pub mod evaluate;
pub mod form;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Routes served under the inbound request timeout, except the health check.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(form::router())
        .merge(evaluate::router())
}

/// Routes that wait on the evaluation backend.
pub fn submission_routes() -> Router<AppState> {
    form::submit_router()
}
