//! The preference form page.

use advisor_core::form::FormState;
use advisor_core::types::{Feature, Field, Requirement, TriState};

use super::{escape, page};

pub const PAGE_TITLE: &str = "Real Estate Advisor";

/// Render the whole form for `state`: current values, inline errors, and
/// the status line of the last submission.
pub fn render_form(state: &FormState) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1 class=\"h1\">{PAGE_TITLE}</h1>\n"));
    body.push_str("<p class=\"sub\">Paste a listing URL and set your requirements.</p>\n");
    body.push_str("<form class=\"form\" method=\"post\" action=\"/submit\">\n");

    body.push_str(&field_block(state, Field::Url, None));
    body.push_str(&field_block(state, Field::PriceMax, Some(Requirement::Price)));

    body.push_str("<div class=\"row2\">\n");
    body.push_str(&field_block(state, Field::SqmMin, None));
    body.push_str(&field_block(state, Field::SqmMax, None));
    body.push_str("</div>\n");
    body.push_str(&must_have_box(state, Requirement::SurfaceSqm, "Surface must have"));

    body.push_str(&field_block(state, Field::BathroomsMin, Some(Requirement::Bathrooms)));

    for feature in [
        Feature::Elevator,
        Feature::OutdoorParking,
        Feature::Garage,
        Feature::Balcony,
        Feature::IsAttic,
    ] {
        body.push_str(&preference_block(state, feature));
    }

    body.push_str(&field_block(state, Field::FloorMin, Some(Requirement::Floor)));
    body.push_str(&preference_block(state, Feature::NeedsRestructuring));

    body.push_str("<button class=\"btn\" type=\"submit\">Evaluate</button>\n");
    if let Some(status) = &state.status {
        let class = if status.success { "status ok" } else { "status error" };
        body.push_str(&format!(
            "<p class=\"{class}\">{}</p>\n",
            escape(&status.message)
        ));
    }
    body.push_str("</form>\n");

    page(PAGE_TITLE, &body)
}

/// Labelled text input with its inline error and, optionally, the
/// must-have checkbox of its requirement group.
fn field_block(state: &FormState, field: Field, must_have: Option<Requirement>) -> String {
    let name = field.name();
    let mut html = format!(
        "<div class=\"field\">\n\
         <label class=\"label\" for=\"{name}\">{label}</label>\n\
         <input class=\"input\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{value}\">\n",
        label = field.label(),
        placeholder = escape(field.placeholder()),
        value = escape(state.inputs.get(field)),
    );
    if let Some(message) = state.errors.message(field) {
        html.push_str(&format!(
            "<p class=\"error\" data-field=\"{name}\">{}</p>\n",
            escape(message)
        ));
    }
    if let Some(requirement) = must_have {
        html.push_str(&must_have_box(state, requirement, "Must have"));
    }
    html.push_str("</div>\n");
    html
}

fn must_have_box(state: &FormState, requirement: Requirement, label: &str) -> String {
    let checked = if state.choices.must_have(requirement) {
        " checked"
    } else {
        ""
    };
    format!(
        "<label class=\"label\"><input type=\"checkbox\" name=\"{name}\"{checked}> {label}</label>\n",
        name = requirement.must_have_input(),
    )
}

/// Select for a tri-state feature plus its must-have checkbox.
fn preference_block(state: &FormState, feature: Feature) -> String {
    let current = state.choices.answer(feature);
    let options: String = TriState::ALL
        .iter()
        .map(|option| {
            let selected = if *option == current { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{selected}>{}</option>",
                option.as_str(),
                option.label()
            )
        })
        .collect();

    format!(
        "<div class=\"field\">\n\
         <label class=\"label\" for=\"{key}\">{title}</label>\n\
         <select class=\"select\" id=\"{key}\" name=\"{key}\">{options}</select>\n\
         {must_have}\
         </div>\n",
        key = feature.key(),
        title = feature.title(),
        must_have = must_have_box(state, feature.requirement(), "Must have"),
    )
}

#[cfg(test)]
mod tests {
    use advisor_core::form::{reduce_all, FormAction, StatusLine};
    use advisor_core::payload::IndifferentPolicy;

    use super::*;

    #[test]
    fn fresh_form_shows_defaults() {
        let html = render_form(&FormState::default());
        assert!(html.contains("<h1 class=\"h1\">Real Estate Advisor</h1>"));
        assert!(html.contains("name=\"price_must_have\" checked"));
        assert!(html.contains("<input type=\"checkbox\" name=\"garage_must_have\"> Must have"));
        assert!(html.contains("<option value=\"indifferent\" selected>Indifferent</option>"));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("class=\"status"));
    }

    #[test]
    fn submitted_values_are_escaped_and_errors_inline() {
        let state = reduce_all(
            FormState::default(),
            [
                FormAction::SetText(Field::Url, "\"><script>".to_string()),
                FormAction::SetPreference(Feature::Balcony, TriState::No),
                FormAction::Submit(IndifferentPolicy::Omit),
            ],
        );
        let html = render_form(&state);
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
        assert!(html.contains(
            "<p class=\"error\" data-field=\"url\">URL must start with http:// or https://</p>"
        ));
        assert!(html.contains("<option value=\"no\" selected>No</option>"));
    }

    #[test]
    fn status_line_is_rendered() {
        let mut state = FormState::default();
        state.status = Some(StatusLine {
            success: false,
            message: "Backend error: HTTP 500".to_string(),
        });
        let html = render_form(&state);
        assert!(html.contains("<p class=\"status error\">Backend error: HTTP 500</p>"));
    }
}
