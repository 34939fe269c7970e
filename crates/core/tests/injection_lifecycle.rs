//! Injection lifecycle integration tests.
//!
//! These tests drive whole page loads through the orchestrator:
//! idle -> checking -> (skipped | loading -> (rendered | failed))

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::MockServer;

use common::catalog_server::{client_for, mount_search, mount_streaming};
use common::{memory_dismissals, page};
use streamguide_core::{
    popup::PageTab,
    testing::{fixtures, MockCatalog, RecordedCatalogQuery},
    AdapterRegistry, Anchor, Config, ContentType, FailureKind, HostPage, InjectionOrchestrator,
    InjectionOutcome, PopupController, RunState, SkipReason, StreamType,
};

const IMDB_URL: &str = "https://www.imdb.com/title/tt1375666/";

fn mock_orchestrator(catalog: &Arc<MockCatalog>) -> InjectionOrchestrator {
    InjectionOrchestrator::new(
        AdapterRegistry::default(),
        catalog.clone(),
        memory_dismissals(),
    )
}

#[tokio::test]
async fn test_scenario_single_subscription_offer() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Inception",
        json!([{ "id": 1, "title": "Inception", "content_type": "movie", "year": 2010 }]),
    )
    .await;
    mount_streaming(
        &server,
        "movies",
        "1",
        json!({ "subscription": [{ "service_name": "MaxFlix" }] }),
    )
    .await;

    let orchestrator = InjectionOrchestrator::new(
        AdapterRegistry::default(),
        Arc::new(client_for(&server, 5)),
        memory_dismissals(),
    );
    let page = page(IMDB_URL, &fixtures::title_detail_markup("Inception"));

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(
        report.transitions,
        vec![
            RunState::Idle,
            RunState::Checking,
            RunState::Loading,
            RunState::Rendered
        ]
    );
    let InjectionOutcome::Rendered { matched, groups, .. } = &report.outcome else {
        panic!("expected rendered, got {:?}", report.outcome);
    };
    assert_eq!(matched.title, "Inception");
    let sections: Vec<_> = groups.sections().collect();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].0, "Streaming");
    assert_eq!(sections[0].1[0].service_name, "MaxFlix");

    let widget = page.widget().unwrap();
    assert_eq!(
        widget.anchor,
        Anchor::landmark(r#"[data-testid="hero-rating-bar__user-rating"]"#)
    );
    assert!(widget.markup.contains(">Streaming<"));
    assert!(widget.markup.contains("MaxFlix"));
}

#[tokio::test]
async fn test_scenario_zero_candidates_fails() {
    let catalog = Arc::new(MockCatalog::new());
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(IMDB_URL, &fixtures::title_detail_markup("Nonexistent Film"));

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(
        report.transitions,
        vec![
            RunState::Idle,
            RunState::Checking,
            RunState::Loading,
            RunState::Failed
        ]
    );
    assert!(!report.transitions.contains(&RunState::Rendered));
    assert!(matches!(
        report.outcome,
        InjectionOutcome::Failed(FailureKind::EmptyResult)
    ));

    let history = page.history();
    assert_eq!(history.len(), 2);
    assert!(history[0].contains("Finding streaming options..."));
    assert!(history[1].contains("Unable to load streaming information"));
    assert!(history[1].contains("Powered by"));
}

#[tokio::test]
async fn test_scenario_reviews_title_from_document_title() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_search_results(vec![
            fixtures::show(5, "Dune: Part Two", None),
            fixtures::movie(6, "Dune: Part Two", Some(2024)),
        ])
        .await;
    catalog
        .set_availability(vec![fixtures::offer("Max", StreamType::Subscription)])
        .await;
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(
        "https://www.rottentomatoes.com/m/dune_part_two",
        &fixtures::reviews_markup_without_landmarks("Dune: Part Two - Rotten Tomatoes"),
    );

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(report.final_state(), RunState::Rendered);
    let queries = catalog.recorded_queries().await;
    assert_eq!(
        queries[0],
        RecordedCatalogQuery::Search {
            query: "Dune: Part Two".to_string()
        }
    );
    // Movie page, so the movie candidate wins over the earlier show.
    assert_eq!(
        queries[1],
        RecordedCatalogQuery::Availability {
            id: 6u64.into(),
            content_type: ContentType::Movie
        }
    );
    assert_eq!(page.widget().unwrap().anchor, Anchor::landmark("main"));
}

#[tokio::test]
async fn test_scenario_dismiss_reload_restore() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_search_results(vec![fixtures::movie(1, "Inception", Some(2010))])
        .await;
    catalog
        .set_availability(vec![fixtures::offer("MaxFlix", StreamType::Subscription)])
        .await;

    let dismissals = memory_dismissals();
    let orchestrator = InjectionOrchestrator::new(
        AdapterRegistry::default(),
        catalog.clone(),
        dismissals.clone(),
    );
    let page = page(
        "https://www.imdb.com/title/tt123",
        &fixtures::title_detail_markup("Inception"),
    );

    // First load renders, then the user dismisses.
    let report = orchestrator.inject(page.clone()).await;
    let dismiss = report.dismiss_control().expect("rendered widget has a close control");
    assert_eq!(dismiss.path(), "/title/tt123");
    dismiss.dismiss().unwrap();

    let widget = page.widget().unwrap();
    assert!(widget.minimized);
    assert!(dismissals.is_dismissed("/title/tt123"));

    // Reload: nothing is created and nothing is fetched.
    page.reload();
    catalog.clear_recorded().await;
    let report = orchestrator.inject(page.clone()).await;
    assert_eq!(report.skip_reason(), Some(SkipReason::Dismissed));
    assert!(page.widget().is_none());
    assert_eq!(catalog.query_count().await, 0);

    // "Show widget" from the popup clears the record and reloads the tab.
    let popup = PopupController::new(catalog.clone(), &Config::default());
    let tab = PageTab::new(page.clone(), dismissals.clone());
    assert!(popup.restore_widget(&tab).await.unwrap());
    assert!(!dismissals.is_dismissed("/title/tt123"));
    assert_eq!(page.reload_count(), 2);

    let report = orchestrator.inject(page.clone()).await;
    assert_eq!(report.final_state(), RunState::Rendered);
    assert!(!page.widget().unwrap().minimized);
}

#[tokio::test]
async fn test_dismissal_ignores_query_string() {
    let catalog = Arc::new(MockCatalog::new());
    let dismissals = memory_dismissals();
    dismissals.set_dismissed("/title/tt1375666/").unwrap();
    let orchestrator =
        InjectionOrchestrator::new(AdapterRegistry::default(), catalog.clone(), dismissals);

    let page = page(
        "https://www.imdb.com/title/tt1375666/?ref_=nv_sr_srsg_0",
        &fixtures::title_detail_markup("Inception"),
    );
    let report = orchestrator.inject(page).await;

    assert_eq!(report.skip_reason(), Some(SkipReason::Dismissed));
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_search_results(vec![fixtures::movie(1, "Inception", Some(2010))])
        .await;
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(IMDB_URL, &fixtures::title_detail_markup("Inception"));

    orchestrator.inject(page.clone()).await;
    let calls = catalog.query_count().await;

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(report.skip_reason(), Some(SkipReason::AlreadyInjected));
    assert_eq!(page.mount_count(), 1);
    assert_eq!(catalog.query_count().await, calls);
}

#[tokio::test(start_paused = true)]
async fn test_container_mounted_while_search_pending() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_search_results(vec![fixtures::movie(1, "Inception", Some(2010))])
        .await;
    catalog
        .set_search_delay("Inception", Duration::from_secs(2))
        .await;
    let orchestrator = Arc::new(mock_orchestrator(&catalog));
    let page = page(IMDB_URL, &fixtures::title_detail_markup("Inception"));

    let run = {
        let orchestrator = Arc::clone(&orchestrator);
        let page = page.clone();
        tokio::spawn(async move { orchestrator.inject(page).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let widget = page.widget().expect("container mounted before the search answers");
    assert!(widget.markup.contains("Finding streaming options..."));
    assert_eq!(page.mount_count(), 1);

    let report = run.await.unwrap();
    assert_eq!(report.final_state(), RunState::Rendered);
    assert_eq!(page.mount_count(), 1);
    assert!(!page
        .widget()
        .unwrap()
        .markup
        .contains("Finding streaming options..."));
}

#[tokio::test]
async fn test_container_in_markup_blocks_injection() {
    let catalog = Arc::new(MockCatalog::new());
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(
        IMDB_URL,
        r#"<html><body><h1>Inception</h1><div id="streamguide-container"></div></body></html>"#,
    );

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(report.skip_reason(), Some(SkipReason::AlreadyInjected));
    assert_eq!(page.mount_count(), 0);
    assert_eq!(catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_zero_offers_render_empty_state() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_search_results(vec![fixtures::movie(3, "Obscure Film", None)])
        .await;
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(IMDB_URL, &fixtures::title_detail_markup("Obscure Film"));

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(report.final_state(), RunState::Rendered);
    let markup = page.widget().unwrap().markup;
    assert!(markup.contains("No streaming information available"));
    assert!(!markup.contains("Unable to load streaming information"));
}

#[tokio::test]
async fn test_search_failure_renders_error() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_next_error(streamguide_core::CatalogError::Timeout(15))
        .await;
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(IMDB_URL, &fixtures::title_detail_markup("Inception"));

    let report = orchestrator.inject(page.clone()).await;

    assert!(matches!(
        report.outcome,
        InjectionOutcome::Failed(FailureKind::NetworkFailure)
    ));
    assert!(page
        .widget()
        .unwrap()
        .markup
        .contains("Unable to load streaming information"));
}

#[tokio::test]
async fn test_search_page_without_movie_signal_is_skipped() {
    let catalog = Arc::new(MockCatalog::new());
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(
        "https://www.google.com/search?q=weather+tomorrow",
        "<html><body><div id=\"search\"></div></body></html>",
    );

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(report.skip_reason(), Some(SkipReason::Ineligible));
    assert!(page.widget().is_none());
}

#[tokio::test]
async fn test_search_page_with_keyword_uses_cleaned_query() {
    let catalog = Arc::new(MockCatalog::new());
    catalog
        .set_search_results(vec![fixtures::movie(1, "Oppenheimer", Some(2023))])
        .await;
    let orchestrator = mock_orchestrator(&catalog);
    let page = page(
        "https://www.google.com/search?q=oppenheimer+movie",
        "<html><body><div id=\"rhs\"></div><div id=\"search\"></div></body></html>",
    );

    let report = orchestrator.inject(page.clone()).await;

    assert_eq!(report.final_state(), RunState::Rendered);
    assert_eq!(
        catalog.recorded_queries().await[0],
        RecordedCatalogQuery::Search {
            query: "oppenheimer".to_string()
        }
    );
    assert_eq!(page.widget().unwrap().anchor, Anchor::landmark("#rhs"));
}
