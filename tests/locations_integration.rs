//! Integration tests for the Location API with Wiremock
//!
//! Drives the full router with a real HTTP geocoder pointed at a mock
//! provider, backed by the in-memory and SQLite stores.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use location_service::adapters::inbound::{router, ApiState};
use location_service::adapters::outbound::{
    DashMapLocationRepository, GeocoderConfig, GoogleGeocoder, SqliteLocationRepository,
};
use location_service::{LocationRepository, LocationService};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

fn ok_response(lat: f64, lng: f64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}],
        "status": "OK"
    }))
}

fn status_response(status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "results": [],
        "status": status
    }))
}

fn app_with(provider: &MockServer, repo: Arc<dyn LocationRepository>) -> Router {
    let geocoder = GoogleGeocoder::new(GeocoderConfig {
        url: format!("{}{}", provider.uri(), GEOCODE_PATH),
        api_key: Some("test-key".to_string()),
    });
    let service = LocationService::new(Arc::new(geocoder), repo);
    router(ApiState::new(Arc::new(service)))
}

fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

fn cupertino() -> serde_json::Value {
    serde_json::json!({
        "name": "A",
        "address": "1 Infinite Loop",
        "city": "Cupertino",
        "state": "CA",
        "zip": "95014"
    })
}

/// Test the documented create example end to end
#[tokio::test]
async fn test_create_example() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "1 Infinite Loop Cupertino CA 95014"))
        .and(query_param("key", "test-key"))
        .respond_with(ok_response(37.33, -122.03))
        .expect(1)
        .mount(&provider)
        .await;

    let repo = Arc::new(DashMapLocationRepository::new());
    let app = app_with(&provider, repo.clone());

    let (status, body) = send(&app, request("POST", "/locations", Some(cupertino()))).await;

    assert_eq!(status, StatusCode::CREATED);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains(r#""coordinate":{"lat":37.33,"lng":-122.03}"#));
    assert_eq!(repo.len(), 1);
}

/// Test create → read → partial update → read → delete → read
#[tokio::test]
async fn test_full_lifecycle() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "1 Infinite Loop Cupertino CA 95014"))
        .respond_with(ok_response(37.33, -122.03))
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "1 Infinite Loop Cupertino CA 95015"))
        .respond_with(ok_response(37.35, -122.01))
        .mount(&provider)
        .await;

    let app = app_with(&provider, Arc::new(DashMapLocationRepository::new()));

    // Create
    let (status, body) = send(&app, request("POST", "/locations", Some(cupertino()))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let uri = format!("/locations/{}", created["id"].as_str().unwrap());

    // Read
    let (status, body) = send(&app, request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, created);

    // Update a subset
    let (status, body) = send(
        &app,
        request("PUT", &uri, Some(serde_json::json!({"zip": "95015"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let updated: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Only zip and coordinate differ
    for field in ["id", "name", "address", "city", "state"] {
        assert_eq!(updated[field], created[field], "{}", field);
    }
    assert_eq!(updated["zip"], "95015");
    assert_eq!(updated["coordinate"], serde_json::json!({"lat": 37.35, "lng": -122.01}));

    let (_, body) = send(&app, request("GET", &uri, None)).await;
    let fetched: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, updated);

    // Delete, then read
    let (status, body) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app, request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again stays 404
    let (status, _) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Test that every non-OK provider status maps to 403 with nothing stored
#[tokio::test]
async fn test_provider_rejections_are_forbidden() {
    for provider_status in ["ZERO_RESULTS", "INVALID_REQUEST", "OVER_QUERY_LIMIT"] {
        let provider = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(GEOCODE_PATH))
            .respond_with(status_response(provider_status))
            .mount(&provider)
            .await;

        let repo = Arc::new(DashMapLocationRepository::new());
        let app = app_with(&provider, repo.clone());

        let (status, _) = send(&app, request("POST", "/locations", Some(cupertino()))).await;

        assert_eq!(status, StatusCode::FORBIDDEN, "{}", provider_status);
        assert!(repo.is_empty());
    }
}

/// Test that a rejected update does not modify the stored record
#[tokio::test]
async fn test_rejected_update_keeps_record() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "1 Infinite Loop Cupertino CA 95014"))
        .respond_with(ok_response(37.33, -122.03))
        .mount(&provider)
        .await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "1 Infinite Loop Nowhere CA 95014"))
        .respond_with(status_response("ZERO_RESULTS"))
        .mount(&provider)
        .await;

    let app = app_with(&provider, Arc::new(DashMapLocationRepository::new()));

    let (_, body) = send(&app, request("POST", "/locations", Some(cupertino()))).await;
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let uri = format!("/locations/{}", created["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        request("PUT", &uri, Some(serde_json::json!({"city": "Nowhere", "name": "B"}))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, request("GET", &uri, None)).await;
    let fetched: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, created);
}

/// Test that malformed ids never reach the provider or the store
#[tokio::test]
async fn test_malformed_ids() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ok_response(0.0, 0.0))
        .expect(0)
        .mount(&provider)
        .await;

    let app = app_with(&provider, Arc::new(DashMapLocationRepository::new()));

    for (verb, body) in [
        ("GET", None),
        ("PUT", Some(serde_json::json!({"name": "B"}))),
        ("DELETE", None),
    ] {
        let (status, _) = send(&app, request(verb, "/locations/xyz", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", verb);
    }
}

/// Test that an update to an unknown id is 404 even when the body is bad
#[tokio::test]
async fn test_update_unknown_id_ignores_body() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ok_response(37.33, -122.03))
        .expect(1)
        .mount(&provider)
        .await;

    let app = app_with(&provider, Arc::new(DashMapLocationRepository::new()));

    for body in [
        serde_json::json!({"zip": 95014}),
        serde_json::json!("not an object"),
        serde_json::json!({"name": "B"}),
    ] {
        let (status, _) = send(
            &app,
            request("PUT", "/locations/5632c7d1e4b0e1a8c8b4a3f2", Some(body)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // The same bad body against a stored record is a client error.
    let (_, body) = send(&app, request("POST", "/locations", Some(cupertino()))).await;
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let uri = format!("/locations/{}", created["id"].as_str().unwrap());

    let bad = serde_json::json!({"zip": 95014});
    let (status, _) = send(&app, request("PUT", &uri, Some(bad))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Test that a provider outage surfaces as 502 and the server keeps serving
#[tokio::test]
async fn test_provider_outage_is_bad_gateway() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&provider)
        .await;

    let app = app_with(&provider, Arc::new(DashMapLocationRepository::new()));

    let (status, _) = send(&app, request("POST", "/locations", Some(cupertino()))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, _) = send(&app, request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
}

/// Test the lifecycle against the SQLite document store
#[tokio::test]
async fn test_sqlite_store_lifecycle() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ok_response(37.33, -122.03))
        .mount(&provider)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("locations.db");
    let repo = Arc::new(SqliteLocationRepository::open(db_path.to_str().unwrap()).unwrap());
    let app = app_with(&provider, repo);

    let (status, body) = send(&app, request("POST", "/locations", Some(cupertino()))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let uri = format!("/locations/{}", created["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        request("PUT", &uri, Some(serde_json::json!({"name": "Renamed"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let updated: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["name"], "Renamed");

    let (status, _) = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Test concurrent creates against one shared service
#[tokio::test]
async fn test_concurrent_creates() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ok_response(37.33, -122.03))
        .expect(20)
        .mount(&provider)
        .await;

    let repo = Arc::new(DashMapLocationRepository::new());
    let app = app_with(&provider, repo.clone());

    let requests = (0..20).map(|_| {
        let app = app.clone();
        async move { send(&app, request("POST", "/locations", Some(cupertino()))).await.0 }
    });

    let statuses = futures::future::join_all(requests).await;

    assert!(statuses.iter().all(|s| *s == StatusCode::CREATED));
    assert_eq!(repo.len(), 20);
}
