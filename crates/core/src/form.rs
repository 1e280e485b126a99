//! Form state as an immutable value plus a pure reducer.
//!
//! The view layer owns a [`FormState`], feeds user events through
//! [`reduce`], and performs the backend call itself whenever the state is
//! [`SubmitPhase::Submitting`]. The outcome comes back in as
//! [`FormAction::SubmissionFinished`].

use crate::payload::{self, Choices, EvaluationRequest, IndifferentPolicy};
use crate::types::{Feature, Field, Requirement, TriState};
use crate::validation::{FieldErrors, RawInputs};

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// A validated request is waiting for the backend call.
    Submitting(EvaluationRequest),
}

/// Text shown under the submit button after a backend round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub inputs: RawInputs,
    pub choices: Choices,
    pub errors: FieldErrors,
    pub phase: SubmitPhase,
    pub status: Option<StatusLine>,
}

impl FormState {
    /// The request to send, if a submit was accepted and is not finished yet.
    pub fn pending_request(&self) -> Option<&EvaluationRequest> {
        match &self.phase {
            SubmitPhase::Submitting(request) => Some(request),
            SubmitPhase::Idle => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetText(Field, String),
    SetPreference(Feature, TriState),
    SetMustHave(Requirement, bool),
    Submit(IndifferentPolicy),
    SubmissionFinished(StatusLine),
}

/// Apply one action.
pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetText(field, value) => {
            state.inputs.set(field, value);
        }
        FormAction::SetPreference(feature, answer) => {
            state.choices.set_answer(feature, answer);
        }
        FormAction::SetMustHave(requirement, on) => {
            state.choices.set_must_have(requirement, on);
        }
        FormAction::Submit(policy) => {
            // Only one backend call may be in flight.
            if state.is_submitting() {
                return state;
            }
            state.status = None;
            match payload::build_request(&state.inputs, &state.choices, policy) {
                Ok(request) => {
                    state.errors = FieldErrors::default();
                    state.phase = SubmitPhase::Submitting(request);
                }
                Err(errors) => {
                    state.errors = errors;
                }
            }
        }
        FormAction::SubmissionFinished(status) => {
            // A completion with nothing in flight is stale.
            if !state.is_submitting() {
                return state;
            }
            state.phase = SubmitPhase::Idle;
            state.status = Some(status);
        }
    }
    state
}

/// Fold a sequence of actions over `state`.
pub fn reduce_all(state: FormState, actions: impl IntoIterator<Item = FormAction>) -> FormState {
    actions.into_iter().fold(state, reduce)
}
