//! Popup fragments: search results, inline availability and trending lists.

use std::fmt::Write;

use super::escape_html;
use crate::catalog::{SearchCandidate, TrendingItem, TrendingService};
use crate::grouping::GroupedOffers;

/// "Movie • 2010", "TV Show"
pub fn result_meta(candidate: &SearchCandidate) -> String {
    match candidate.year {
        Some(year) => format!("{} • {}", candidate.content_type.display_label(), year),
        None => candidate.content_type.display_label().to_string(),
    }
}

pub fn render_popup_loading(message: &str) -> String {
    format!(
        r#"<div class="loading"><div class="spinner"></div><span>{}</span></div>"#,
        escape_html(message)
    )
}

pub fn render_popup_empty(message: &str) -> String {
    format!(r#"<div class="empty">{}</div>"#, escape_html(message))
}

/// Indexed result list; the index is what the popup passes back on select.
pub fn render_popup_results(results: &[SearchCandidate]) -> String {
    if results.is_empty() {
        return render_popup_empty("No results found");
    }

    let mut out = String::new();
    for (index, candidate) in results.iter().enumerate() {
        let _ = write!(
            out,
            r#"<div class="result-item" data-index="{}"><div class="result-title">{}</div><div class="result-meta">{}</div></div>"#,
            index,
            escape_html(&candidate.title),
            escape_html(&result_meta(candidate))
        );
    }
    out
}

pub fn render_popup_availability(groups: &GroupedOffers) -> String {
    if groups.is_empty() {
        return render_popup_empty("No streaming options found");
    }

    let mut out = String::new();
    for (stream_type, offers) in groups.buckets().filter(|(_, o)| !o.is_empty()) {
        let _ = write!(
            out,
            r#"<div class="section-title">{}</div><div class="services">"#,
            escape_html(stream_type.label())
        );
        for offer in offers {
            let logo = offer
                .service_logo_url
                .as_deref()
                .map(|src| {
                    format!(
                        r#"<img src="{}" class="service-logo" alt="">"#,
                        escape_html(src)
                    )
                })
                .unwrap_or_default();
            let _ = write!(
                out,
                r#"<a href="{}" target="_blank" class="service" data-type="{}">{}<span>{}</span></a>"#,
                escape_html(offer.link.as_deref().unwrap_or("#")),
                escape_html(stream_type.as_key()),
                logo,
                escape_html(&offer.service_name)
            );
        }
        out.push_str("</div>");
    }
    out
}

pub fn render_trending(items: &[TrendingItem]) -> String {
    if items.is_empty() {
        return render_popup_empty("No trending titles");
    }

    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let mut meta = result_meta(&item.as_candidate());
        if let Some(service) = &item.service_name {
            let _ = write!(meta, " • {}", service);
        }
        let _ = write!(
            out,
            r#"<div class="trending-item" data-index="{}"><span class="trending-rank">{}</span><div class="result-title">{}</div><div class="result-meta">{}</div></div>"#,
            index,
            index + 1,
            escape_html(&item.title),
            escape_html(&meta)
        );
    }
    out
}

pub fn render_trending_services(services: &[TrendingService]) -> String {
    let mut out =
        String::from(r#"<button class="service-filter active" data-service="">All</button>"#);
    for service in services {
        let name = escape_html(&service.service_name);
        let _ = write!(
            out,
            r#"<button class="service-filter" data-service="{}">{}</button>"#,
            name, name
        );
    }
    out
}
