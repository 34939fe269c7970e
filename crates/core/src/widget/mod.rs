//! Widget markup.
//!
//! Rendering is a pure function of [`WidgetState`]. All interpolated text is
//! HTML-escaped; the page owns styling through the `streamguide-*` classes.

mod popup;

pub use popup::{
    render_popup_availability, render_popup_empty, render_popup_loading, render_popup_results,
    render_trending, render_trending_services, result_meta,
};

use std::fmt::Write;

use crate::catalog::{AvailabilityOffer, FailureKind, StreamType};
use crate::grouping::GroupedOffers;

const POWERED_BY_URL: &str = "https://rapidapi.com/jsimms1970/api/streamguide";

pub const EMPTY_TEXT: &str = "No streaming information available";
pub const ERROR_TEXT: &str = "Unable to load streaming information";

/// Visual state of the injected widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Idle,
    Loading,
    Rendered { title: String, groups: GroupedOffers },
    Failed { kind: FailureKind },
}

/// Escape text for interpolation into element content or a quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for a widget state. `Idle` renders nothing.
pub fn render(state: &WidgetState) -> String {
    match state {
        WidgetState::Idle => String::new(),
        WidgetState::Loading => render_loading(),
        WidgetState::Rendered { title, groups } => render_rendered(title, groups),
        WidgetState::Failed { .. } => render_failed(),
    }
}

fn header(subtitle: Option<&str>) -> String {
    let mut out = String::from(
        r#"<div class="streamguide-header"><div class="streamguide-logo">S</div><div><div class="streamguide-title">Where to Watch</div>"#,
    );
    if let Some(subtitle) = subtitle {
        let _ = write!(
            out,
            r#"<div class="streamguide-subtitle">{}</div>"#,
            escape_html(subtitle)
        );
    }
    out.push_str("</div></div>");
    out
}

fn powered_by() -> String {
    format!(
        r#"<div class="streamguide-powered">Powered by <a href="{}" target="_blank">StreamGuide API</a></div>"#,
        POWERED_BY_URL
    )
}

fn render_loading() -> String {
    format!(
        r#"<div class="streamguide-widget">{}<div class="streamguide-loading"><div class="streamguide-spinner"></div><span>Finding streaming options...</span></div></div>"#,
        header(Some("Loading..."))
    )
}

fn render_failed() -> String {
    format!(
        r#"<div class="streamguide-widget">{}<div class="streamguide-error">{}</div>{}</div>"#,
        header(None),
        ERROR_TEXT,
        powered_by()
    )
}

fn render_rendered(title: &str, groups: &GroupedOffers) -> String {
    let mut sections = String::new();
    for (stream_type, offers) in groups.buckets().filter(|(_, o)| !o.is_empty()) {
        let _ = write!(
            sections,
            r#"<div class="streamguide-section"><div class="streamguide-section-title">{}</div><div class="streamguide-services">"#,
            escape_html(stream_type.label())
        );
        for offer in offers {
            sections.push_str(&service_link(offer, stream_type));
        }
        sections.push_str("</div></div>");
    }

    if sections.is_empty() {
        let _ = write!(sections, r#"<div class="streamguide-empty">{}</div>"#, EMPTY_TEXT);
    }

    format!(
        r#"<div class="streamguide-widget"><button class="streamguide-close" id="streamguide-close" title="Close">×</button>{}{}{}</div>"#,
        header(Some(title)),
        sections,
        powered_by()
    )
}

fn service_link(offer: &AvailabilityOffer, bucket: &StreamType) -> String {
    let name = escape_html(&offer.service_name);
    let logo = offer
        .service_logo_url
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" class="streamguide-service-logo" alt="">"#,
                escape_html(src)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<a href="{href}" target="_blank" rel="noopener noreferrer" class="streamguide-service" data-type="{key}" title="{name} ({label})">{logo}<span class="streamguide-service-name">{name}</span></a>"#,
        href = escape_html(offer.link.as_deref().unwrap_or("#")),
        key = escape_html(bucket.as_key()),
        label = escape_html(bucket.label()),
        name = name,
        logo = logo,
    )
}
