//! IP-based position lookup against a mock HTTP server.

use farmdash_core::{GeoCoordinate, IpLocator, LocationError, Locator, WeatherWidget};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_locate_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Nashik",
            "latitude": 10.0,
            "longitude": 20.0
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::with_base_url(&server.uri());
    let at = locator.locate().await.unwrap();

    assert_eq!(at, GeoCoordinate::new(10.0, 20.0));
}

#[tokio::test]
async fn test_rejected_lookup_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "reason": "RateLimited"
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::with_base_url(&server.uri());
    let err = locator.locate().await.unwrap_err();

    match err {
        LocationError::Unavailable(reason) => assert_eq!(reason, "RateLimited"),
        other => panic!("expected unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forbidden_lookup_keeps_default_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let locator = IpLocator::with_base_url(&server.uri());
    let mut widget = WeatherWidget::default();
    widget.mount();

    assert!(widget.use_device_location(&locator).await.is_none());
    assert_eq!(widget.coordinate(), GeoCoordinate::default());
    assert_eq!(
        widget.advisory(),
        Some("Unable to get your location. Using default location.")
    );
    assert!(widget.current().is_pending());
}
