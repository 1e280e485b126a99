//! The results page: progress ring plus the echo of submitted inputs.

use advisor_core::form::StatusLine;
use advisor_core::results::{EchoRow, ProgressRing, RING_RADIUS, RING_STROKE};

use super::{escape, page};

pub const PAGE_TITLE: &str = "Results";

/// Render the results page. `echo` and `status` are filled right after a
/// successful submission and empty on the standalone page.
pub fn render_results(ring: &ProgressRing, echo: &[EchoRow], status: Option<&StatusLine>) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1 class=\"h1\">{PAGE_TITLE}</h1>\n"));
    body.push_str(&render_ring(ring));

    if let Some(status) = status {
        body.push_str(&format!(
            "<p class=\"status ok\">{}</p>\n",
            escape(&status.message)
        ));
    }

    if !echo.is_empty() {
        body.push_str("<table class=\"echo\">\n<tr><th>Requirement</th><th>Value</th><th>Must have</th></tr>\n");
        for row in echo {
            let must_have = match row.must_have {
                Some(true) => "yes",
                Some(false) => "no",
                None => "",
            };
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{must_have}</td></tr>\n",
                escape(row.label),
                escape(&row.value),
            ));
        }
        body.push_str("</table>\n");
    }

    body.push_str("<p><a href=\"/\">Back</a></p>\n");
    page(PAGE_TITLE, &body)
}

/// SVG ring whose visible stroke covers the clamped percentage.
pub fn render_ring(ring: &ProgressRing) -> String {
    let size = 2.0 * (RING_RADIUS + RING_STROKE);
    let center = size / 2.0;
    let label = ring.label();
    format!(
        "<svg class=\"ring\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" role=\"img\" aria-label=\"{label} match\">\n\
         <circle cx=\"{center}\" cy=\"{center}\" r=\"{RING_RADIUS}\" fill=\"none\" stroke=\"#e5e7eb\" stroke-width=\"{RING_STROKE}\"/>\n\
         <circle class=\"ring-fill\" cx=\"{center}\" cy=\"{center}\" r=\"{RING_RADIUS}\" fill=\"none\" stroke=\"#2563eb\" stroke-width=\"{RING_STROKE}\" \
         stroke-dasharray=\"{circumference:.3}\" stroke-dashoffset=\"{offset:.3}\" transform=\"rotate(-90 {center} {center})\"/>\n\
         <text x=\"{center}\" y=\"{center}\" text-anchor=\"middle\" dominant-baseline=\"central\">{label}</text>\n\
         </svg>\n",
        circumference = ring.circumference(),
        offset = ring.dash_offset(),
    )
}
