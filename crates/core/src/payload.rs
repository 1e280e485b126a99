//! Payload Normalizer: validated inputs plus choices to the backend's JSON
//! contract.
//!
//! Blank range fields get fixed defaults. Indifferent tri-state answers are
//! handled by an explicit [`IndifferentPolicy`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{Feature, Requirement, TriState};
use crate::validation::{self, FieldErrors, ParsedInputs, RawInputs, MSG_SQM_INCONSISTENT};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_PRICE_MAX: f64 = 450_000.0;
pub const DEFAULT_SQM_MIN: f64 = 80.0;
pub const DEFAULT_SQM_MAX: f64 = 100.0;
pub const DEFAULT_BATHROOMS_MIN: u64 = 2;
pub const DEFAULT_FLOOR_MIN: u64 = 3;

// ---------------------------------------------------------------------------
// IndifferentPolicy
// ---------------------------------------------------------------------------

/// How an `indifferent` tri-state answer reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndifferentPolicy {
    /// Leave the field out of the payload.
    #[default]
    Omit,
    /// Send `{ value: false, must_have: false }`.
    SendFalse,
}

impl FromStr for IndifferentPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "false" | "send_false" => Ok(Self::SendFalse),
            other => Err(CoreError::Validation(format!(
                "unknown indifferent policy '{other}', expected 'omit' or 'false'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct PriceRange {
    #[validate(range(min = 0.0))]
    pub max: f64,
    pub must_have: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_surface_bounds"))]
pub struct SurfaceRange {
    #[validate(range(min = 0.0))]
    pub min: f64,
    #[validate(range(min = 0.0))]
    pub max: f64,
    pub must_have: bool,
}

/// Lower bound on a count (bathrooms, floor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumCount {
    pub min: u64,
    pub must_have: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub value: bool,
    pub must_have: bool,
}

/// Body of `POST /evaluate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EvaluationRequest {
    #[validate(custom(function = "validate_listing_url"))]
    pub url: String,
    #[validate(nested)]
    pub price: PriceRange,
    #[validate(nested)]
    pub surface_sqm: SurfaceRange,
    pub bathrooms: MinimumCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevator: Option<Preference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_parking: Option<Preference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garage: Option<Preference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balcony: Option<Preference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_attic: Option<Preference>,
    pub floor: MinimumCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_restructuring: Option<Preference>,
}

impl EvaluationRequest {
    /// The tri-state entry for `feature`, `None` when it was omitted.
    pub fn preference(&self, feature: Feature) -> Option<&Preference> {
        match feature {
            Feature::Elevator => self.elevator.as_ref(),
            Feature::OutdoorParking => self.outdoor_parking.as_ref(),
            Feature::Garage => self.garage.as_ref(),
            Feature::Balcony => self.balcony.as_ref(),
            Feature::IsAttic => self.is_attic.as_ref(),
            Feature::NeedsRestructuring => self.needs_restructuring.as_ref(),
        }
    }
}

#[allow(clippy::ptr_arg)]
fn validate_listing_url(url: &String) -> Result<(), ValidationError> {
    validation::validate_url(url).map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("invalid_format");
        err.message = Some(Cow::Owned(e.message));
        err
    })
}

fn validate_surface_bounds(range: &SurfaceRange) -> Result<(), ValidationError> {
    if range.min > range.max {
        let mut err = ValidationError::new("inconsistent_range");
        err.message = Some(Cow::Borrowed(MSG_SQM_INCONSISTENT));
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

/// Non-text form state: tri-state answers and must-have flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    answers: HashMap<Feature, TriState>,
    must_have: HashMap<Requirement, bool>,
}

impl Default for Choices {
    /// Every feature indifferent, must-have flags at their fresh-form defaults.
    fn default() -> Self {
        Self {
            answers: Feature::ALL
                .iter()
                .map(|f| (*f, TriState::Indifferent))
                .collect(),
            must_have: Requirement::ALL
                .iter()
                .map(|r| (*r, r.default_must_have()))
                .collect(),
        }
    }
}

impl Choices {
    pub fn answer(&self, feature: Feature) -> TriState {
        self.answers.get(&feature).copied().unwrap_or_default()
    }

    pub fn set_answer(&mut self, feature: Feature, answer: TriState) {
        self.answers.insert(feature, answer);
    }

    pub fn must_have(&self, requirement: Requirement) -> bool {
        self.must_have
            .get(&requirement)
            .copied()
            .unwrap_or_else(|| requirement.default_must_have())
    }

    pub fn set_must_have(&mut self, requirement: Requirement, on: bool) {
        self.must_have.insert(requirement, on);
    }

    /// Payload entry for `feature` under `policy`.
    pub fn preference(&self, feature: Feature, policy: IndifferentPolicy) -> Option<Preference> {
        match (self.answer(feature).as_bool(), policy) {
            (Some(value), _) => Some(Preference {
                value,
                must_have: self.must_have(feature.requirement()),
            }),
            (None, IndifferentPolicy::Omit) => None,
            (None, IndifferentPolicy::SendFalse) => Some(Preference {
                value: false,
                must_have: false,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Build the request from already-validated inputs.
///
/// `surface_sqm.min <= surface_sqm.max` holds only when the user typed both
/// bounds, since that is the pair the validator cross-checks. A blank bound
/// takes its default unchecked, so a typed max of 50 next to the default
/// min of 80 yields a request that fails `EvaluationRequest::validate`.
pub fn normalize(
    parsed: &ParsedInputs,
    choices: &Choices,
    policy: IndifferentPolicy,
) -> EvaluationRequest {
    EvaluationRequest {
        url: parsed.url.clone(),
        price: PriceRange {
            max: parsed.price_max.unwrap_or(DEFAULT_PRICE_MAX),
            must_have: choices.must_have(Requirement::Price),
        },
        surface_sqm: SurfaceRange {
            min: parsed.sqm_min.unwrap_or(DEFAULT_SQM_MIN),
            max: parsed.sqm_max.unwrap_or(DEFAULT_SQM_MAX),
            must_have: choices.must_have(Requirement::SurfaceSqm),
        },
        bathrooms: MinimumCount {
            min: parsed.bathrooms_min.unwrap_or(DEFAULT_BATHROOMS_MIN),
            must_have: choices.must_have(Requirement::Bathrooms),
        },
        elevator: choices.preference(Feature::Elevator, policy),
        outdoor_parking: choices.preference(Feature::OutdoorParking, policy),
        garage: choices.preference(Feature::Garage, policy),
        balcony: choices.preference(Feature::Balcony, policy),
        is_attic: choices.preference(Feature::IsAttic, policy),
        floor: MinimumCount {
            min: parsed.floor_min.unwrap_or(DEFAULT_FLOOR_MIN),
            must_have: choices.must_have(Requirement::Floor),
        },
        needs_restructuring: choices.preference(Feature::NeedsRestructuring, policy),
    }
}

/// Validate raw inputs and normalize in one step.
pub fn build_request(
    raw: &RawInputs,
    choices: &Choices,
    policy: IndifferentPolicy,
) -> Result<EvaluationRequest, FieldErrors> {
    let parsed = validation::validate_inputs(raw)?;
    Ok(normalize(&parsed, choices, policy))
}
