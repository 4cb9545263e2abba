//! Integration tests for the maps fetcher
//!
//! These use wiremock to serve canned search-results pages and exercise the
//! full fetch-and-extract path over HTTP.

use gridsweep::fetch::{build_http_client, FetchError, Fetcher, MapsFetcher, SearchTask};
use gridsweep::geo::GeoPoint;
use url::Url;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"
<html><body>
<div class="m6QErb DxyBCb kA9KIf dS8AEf">
  <div class="Nv2PK">
    <div class="qBF1Pd fontHeadlineSmall">Blue Door Cafe</div>
    <span class="MW4etd">4.6</span>
    <span class="UY7F9">(1,204)</span>
    <div class="details">
      <div class="W4Efsd">Coffee shop · 123 Main St</div>
      <div class="W4Efsd">Open · Closes 5 PM</div>
      <div class="W4Efsd"><span class="UsdlK">(612) 555-0188</span></div>
    </div>
    <a class="lcr4fd" href="https://bluedoor.example/">Website</a>
  </div>
  <div class="Nv2PK">
    <div class="qBF1Pd fontHeadlineSmall">Corner Bakery</div>
    <span class="MW4etd">4.1</span>
    <span class="UY7F9">(87)</span>
    <div class="details">
      <div class="W4Efsd">Bakery · 9 Elm St</div>
    </div>
  </div>
</div>
</body></html>
"#;

fn create_test_task() -> SearchTask {
    SearchTask {
        center: GeoPoint::new(44.9778, -93.2650),
        query: "coffee shop".to_string(),
        radius_km: 1.0,
    }
}

fn fetcher_for(server: &MockServer) -> MapsFetcher {
    let base = Url::parse(&format!("{}/maps/search/", server.uri())).unwrap();
    MapsFetcher::with_base_url(build_http_client().unwrap(), base)
}

#[tokio::test]
async fn test_fetch_extracts_places_from_results_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/maps/search/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    let task = create_test_task();
    let places = fetcher.fetch(&task).await.expect("fetch should succeed");

    assert_eq!(places.len(), 2);

    assert_eq!(places[0].name, "Blue Door Cafe");
    assert_eq!(places[0].address, "123 Main St");
    assert_eq!(places[0].rating, 4.6);
    assert_eq!(places[0].review_count, 1204);
    assert_eq!(places[0].phone.as_deref(), Some("(612) 555-0188"));
    // Extracted places carry the sub-search center
    assert_eq!(places[0].coordinates, task.center);

    assert_eq!(places[1].name, "Corner Bakery");
    assert_eq!(places[1].address, "9 Elm St");
    assert!(places[1].phone.is_none());
    assert!(places[1].website.is_none());
}

#[tokio::test]
async fn test_fetch_empty_page_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let places = fetcher_for(&server)
        .fetch(&create_test_task())
        .await
        .expect("an empty results page is not an error");
    assert!(places.is_empty());
}

#[tokio::test]
async fn test_fetch_reports_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = fetcher_for(&server).fetch(&create_test_task()).await;
    assert!(matches!(result, Err(FetchError::Http { .. })));
}
