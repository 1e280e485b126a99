//! Handlers for the preference form.
//!
//! The server keeps no form state between requests. Each `POST /submit`
//! replays the posted fields through the reducer from a fresh
//! [`FormState`], submits, and renders the outcome.

use std::collections::HashMap;

use advisor_client::submission::status_line;
use advisor_core::form::{self, FormAction, FormState};
use advisor_core::results::{echo_rows, ProgressRing, MOCK_MATCH_PERCENT};
use advisor_core::types::{Feature, Field, Requirement, TriState};
use axum::extract::State;
use axum::response::Html;
use axum::Form;

use crate::state::AppState;
use crate::views;

/// GET /
///
/// Empty form with fresh-form defaults.
pub async fn show_form() -> Html<String> {
    Html(views::form::render_form(&FormState::default()))
}

/// POST /submit
///
/// Validation failures re-render the form with inline errors and send
/// nothing. Backend or network failures re-render the form with the status
/// line. Success renders the results page.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    let form = form::reduce_all(FormState::default(), actions_from_fields(&fields));
    let form = form::reduce(form, FormAction::Submit(state.config.indifferent_policy));

    let Some(request) = form.pending_request().cloned() else {
        tracing::info!(error_count = form.errors.len(), "Form rejected by validation");
        return Html(views::form::render_form(&form));
    };

    let outcome = state.client.submit(&request).await;
    let form = form::reduce(form, FormAction::SubmissionFinished(status_line(&outcome)));

    match outcome {
        Ok(_) => Html(views::results::render_results(
            &ProgressRing::new(MOCK_MATCH_PERCENT),
            &echo_rows(&request, &form.choices),
            form.status.as_ref(),
        )),
        Err(e) => {
            tracing::warn!(error = %e, listing = %request.url, "Submission failed");
            Html(views::form::render_form(&form))
        }
    }
}

/// Translate posted form fields into reducer actions.
///
/// Missing text inputs count as blank, missing or unknown selects as
/// indifferent, and a must-have checkbox is on only when present.
pub fn actions_from_fields(fields: &HashMap<String, String>) -> Vec<FormAction> {
    let texts = Field::ALL.into_iter().map(|field| {
        FormAction::SetText(field, fields.get(field.name()).cloned().unwrap_or_default())
    });
    let answers = Feature::ALL.into_iter().map(|feature| {
        let answer = fields
            .get(feature.key())
            .map(|v| TriState::from_form_value(v))
            .unwrap_or_default();
        FormAction::SetPreference(feature, answer)
    });
    let flags = Requirement::ALL.into_iter().map(|requirement| {
        FormAction::SetMustHave(
            requirement,
            fields.contains_key(requirement.must_have_input()),
        )
    });

    texts.chain(answers).chain(flags).collect()
}
