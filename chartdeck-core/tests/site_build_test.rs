//! End-to-end tests: local index → records → page

mod common;

use chartdeck_core::catalog::{parse_index, FileFetcher, ParseStrategy, INDEX_FILE};
use chartdeck_core::config::SiteConfig;
use chartdeck_core::site::{
    load_charts, render_page, GridState, HtmlPresenter, Presenter, EMPTY_MESSAGE,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_helm_index_fixture() {
    let parsed = parse_index(&common::fixture("helm_index.yaml"));
    assert_eq!(parsed.strategy, ParseStrategy::Structural);

    let names: Vec<&str> = parsed.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["hostendpoint-operator", "node-labeler"]);

    let operator = &parsed.records[0];
    assert_eq!(operator.version, "0.2.0");
    assert_eq!(operator.app_version, "0.2.0");
    assert_eq!(operator.created, "2025-01-15T10:30:00.123456789Z");
    assert_eq!(
        operator.description,
        "Kubernetes operator that manages HostEndpoint resources for cluster nodes. \
         for cluster nodes. Keeps Calico policy in sync."
    );

    let labeler = &parsed.records[1];
    assert_eq!(labeler.version, "1.4.2");
    assert_eq!(labeler.app_version, "1.4.2");
    assert_eq!(labeler.description, "Applies labels to <nodes> & taints");
}

#[test]
fn test_shifted_index_uses_fallback() {
    let parsed = parse_index(&common::fixture("shifted_index.yaml"));
    assert_eq!(parsed.strategy, ParseStrategy::Pattern);
    assert_eq!(parsed.records.len(), 2);

    assert_eq!(parsed.records[0].name, "widget");
    assert_eq!(parsed.records[0].description, "Runs agent software");
    assert_eq!(parsed.records[0].version, "1.0.0");
    assert_eq!(parsed.records[0].app_version, "5.1");

    assert_eq!(parsed.records[1].name, "gadget");
    assert_eq!(parsed.records[1].version, "0.9.0");
    assert_eq!(parsed.records[1].app_version, "0.9.0");
}

#[test]
fn test_unrecognized_layout_is_empty() {
    let parsed = parse_index(&common::fixture("indented_index.yaml"));
    assert_eq!(parsed.strategy, ParseStrategy::Nothing);
    assert!(parsed.records.is_empty());
}

#[tokio::test]
async fn test_build_page_from_site_directory() {
    common::init_test_logging();
    let site = TempDir::new().unwrap();
    std::fs::copy(
        common::fixture_path("helm_index.yaml"),
        site.path().join(INDEX_FILE),
    )
    .unwrap();

    let fetcher = FileFetcher::new(site.path());
    let mut presenter = HtmlPresenter::new("glavien");
    load_charts(&fetcher, &mut presenter).await.unwrap();

    let page = render_page(&SiteConfig::default(), presenter.grid());

    assert_eq!(presenter.state(), GridState::Charts(2));
    assert!(page.contains("fa-network-wired"));
    assert!(page.contains("Applies labels to &lt;nodes&gt; &amp; taints"));
    assert!(!page.contains("<nodes>"));
    assert!(page.contains("helm install my-node-labeler glavien/node-labeler"));
    assert!(page.contains("2025-01-15"));
}

#[tokio::test]
async fn test_empty_index_renders_empty_state() {
    let site = TempDir::new().unwrap();
    std::fs::write(site.path().join(INDEX_FILE), "").unwrap();

    let fetcher = FileFetcher::new(site.path());
    let mut presenter = HtmlPresenter::new("glavien");
    let records = load_charts(&fetcher, &mut presenter).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(presenter.state(), GridState::Empty);
    assert!(presenter.grid().contains(EMPTY_MESSAGE));
}

#[tokio::test]
async fn test_missing_index_renders_error_state() {
    let site = TempDir::new().unwrap();

    let fetcher = FileFetcher::new(site.path());
    let mut presenter = HtmlPresenter::new("glavien");
    let result = load_charts(&fetcher, &mut presenter).await;

    assert!(result.is_err());
    assert_eq!(presenter.state(), GridState::Error);

    // The loading state is replaced, not appended to
    presenter.render_loading();
    assert_eq!(presenter.state(), GridState::Loading);
    assert!(!presenter.grid().contains("Error loading charts"));
}
