//! Results model: match percentage, progress ring geometry, and the echo of
//! submitted inputs.

use crate::payload::{Choices, EvaluationRequest};
use crate::types::{Feature, Requirement, TriState};

/// Placeholder score shown until the backend returns a real one.
pub const MOCK_MATCH_PERCENT: f64 = 78.0;

/// Ring radius in SVG user units.
pub const RING_RADIUS: f64 = 54.0;

/// Ring stroke width in SVG user units.
pub const RING_STROKE: f64 = 12.0;

/// Clamp to `[0, 100]`. NaN counts as 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Circular progress indicator whose filled arc is proportional to the
/// percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    percent: f64,
}

impl ProgressRing {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: clamp_percent(percent),
        }
    }

    /// Clamped percentage.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * RING_RADIUS
    }

    /// Length of the filled arc.
    pub fn filled_length(&self) -> f64 {
        self.circumference() * self.percent / 100.0
    }

    /// `stroke-dashoffset` that leaves exactly [`Self::filled_length`] visible.
    pub fn dash_offset(&self) -> f64 {
        self.circumference() * (100.0 - self.percent) / 100.0
    }

    /// Rounded label, e.g. `78%`.
    pub fn label(&self) -> String {
        format!("{}%", self.percent.round() as u32)
    }
}

/// One submitted input echoed back on the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoRow {
    pub label: &'static str,
    pub value: String,
    /// `None` for rows without a must-have flag (the URL).
    pub must_have: Option<bool>,
}

/// Rows describing `request`, in form order.
///
/// Tri-state rows echo the answer from `choices`, so an indifferent answer
/// reads "indifferent" even when the policy sent it as `false`. Their
/// must-have column is the flag that was sent.
pub fn echo_rows(request: &EvaluationRequest, choices: &Choices) -> Vec<EchoRow> {
    let mut rows = vec![
        EchoRow {
            label: "Listing URL",
            value: request.url.clone(),
            must_have: None,
        },
        EchoRow {
            label: Requirement::Price.title(),
            value: format!("≤ {}", format_number(request.price.max)),
            must_have: Some(request.price.must_have),
        },
        EchoRow {
            label: Requirement::SurfaceSqm.title(),
            value: format!(
                "{}–{} sqm",
                format_number(request.surface_sqm.min),
                format_number(request.surface_sqm.max)
            ),
            must_have: Some(request.surface_sqm.must_have),
        },
        EchoRow {
            label: Requirement::Bathrooms.title(),
            value: format!("≥ {}", request.bathrooms.min),
            must_have: Some(request.bathrooms.must_have),
        },
    ];

    let feature_row = |feature: Feature| EchoRow {
        label: feature.title(),
        value: match choices.answer(feature) {
            TriState::Indifferent => "indifferent",
            TriState::Yes => "yes",
            TriState::No => "no",
        }
        .to_string(),
        must_have: Some(request.preference(feature).is_some_and(|pref| pref.must_have)),
    };

    rows.extend(
        [
            Feature::Elevator,
            Feature::OutdoorParking,
            Feature::Garage,
            Feature::Balcony,
            Feature::IsAttic,
        ]
        .into_iter()
        .map(feature_row),
    );
    rows.push(EchoRow {
        label: Requirement::Floor.title(),
        value: format!("≥ {}", request.floor.min),
        must_have: Some(request.floor.must_have),
    });
    rows.push(feature_row(Feature::NeedsRestructuring));
    rows
}

/// Whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
