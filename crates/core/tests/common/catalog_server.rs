use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use streamguide_core::{StreamGuideClient, StreamGuideConfig};

/// Client pointed at a mock server.
pub fn client_for(server: &MockServer, timeout_secs: u64) -> StreamGuideClient {
    StreamGuideClient::new(StreamGuideConfig {
        base_url: server.uri(),
        timeout_secs,
    })
    .expect("client builds")
}

/// Serve `GET /v1/search?q=<query>` with the given results.
pub async fn mount_search(server: &MockServer, query: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

/// Serve `GET /v1/<segment>/<id>/streaming` with the given providers map.
pub async fn mount_streaming(server: &MockServer, segment: &str, id: &str, providers: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{}/{}/streaming", segment, id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "providers": providers })))
        .mount(server)
        .await;
}

/// Answer every request to `url_path` with a bare status code.
pub async fn mount_status(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream unavailable"))
        .mount(server)
        .await;
}

/// Answer `url_path` only after `delay`.
pub async fn mount_slow(server: &MockServer, url_path: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [] }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}
