//! HTTP-level tests for the axum router, with wiremock standing in for the
//! place provider.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use comicfinder::config::Settings;
use comicfinder::network::HttpClient;
use comicfinder::web::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(base_url: &str, api_key: Option<&str>) -> Router {
    let mut settings = Settings::default();
    settings.provider.base_url = base_url.to_string();
    settings.provider.api_key = api_key.map(str::to_string);
    create_router(AppState::new(settings, HttpClient::new().unwrap()))
}

async fn send(
    app: Router,
    request: Request<Body>,
) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), headers)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body, _) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn no_calls_expected(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_latitude_is_bad_request() {
    let server = MockServer::start().await;
    no_calls_expected(&server).await;

    let (status, body) = get_json(
        app(&server.uri(), Some("test-key")),
        "/api/find-stores?lng=-77.0369&radius=10000",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Latitude and longitude are required." }));
}

#[tokio::test]
async fn malformed_coordinates_are_bad_request() {
    let server = MockServer::start().await;
    no_calls_expected(&server).await;

    let (status, body) = get_json(
        app(&server.uri(), Some("test-key")),
        "/api/find-stores?lat=north&lng=-77.0369",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Latitude and longitude must be valid coordinates."
    );
}

#[tokio::test]
async fn undecodable_query_string_is_json_bad_request() {
    let server = MockServer::start().await;
    no_calls_expected(&server).await;

    let request = Request::builder()
        .uri("/api/find-stores?lat=1&lat=2&lng=3")
        .body(Body::empty())
        .unwrap();
    let (status, body, headers) = send(app(&server.uri(), Some("test-key")), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("lat"));
}

#[tokio::test]
async fn missing_api_key_is_server_error() {
    let server = MockServer::start().await;
    no_calls_expected(&server).await;

    let (status, body) = get_json(
        app(&server.uri(), None),
        "/api/find-stores?lat=38.9072&lng=-77.0369",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Server configuration error. API key not found." })
    );
}

#[tokio::test]
async fn search_returns_places_from_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{
                "id": "fantom",
                "displayName": { "text": "Fantom Comics" },
                "formattedAddress": "2010 P St NW, Washington, DC",
                "rating": 4.8
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(
        app(&server.uri(), Some("test-key")),
        "/api/find-stores?lat=38.9072&lng=-77.0369&radius=10000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "places": [{
                "displayName": "Fantom Comics",
                "id": "fantom",
                "rating": 4.8,
                "photoReference": null,
                "address": "2010 P St NW, Washington, DC"
            }],
            "strategy": "Text Search for Comic Book Stores",
            "totalFound": 1,
            "filteredCount": 1
        })
    );
}

#[tokio::test]
async fn zero_strategy_timeout_still_searches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{ "id": "c1", "displayName": { "text": "Comics Plus" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = Settings::default();
    settings.provider.base_url = server.uri();
    settings.provider.api_key = Some("test-key".to_string());
    settings.search.strategy_timeout = 0.0;
    let app = create_router(AppState::new(settings, HttpClient::new().unwrap()));

    let (status, body) = get_json(app, "/api/find-stores?lat=38.9072&lng=-77.0369").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["places"][0]["displayName"], "Comics Plus");
}

#[tokio::test]
async fn search_accepts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "places": [] })))
        .expect(3)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/find-stores")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"lat": 38.9072, "lng": -77.0369, "radius": 10000}"#))
        .unwrap();
    let (status, body, _) = send(app(&server.uri(), Some("test-key")), request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["places"], json!([]));
    assert_eq!(
        body["message"],
        "No comic book stores found using any search method"
    );
    assert_eq!(body["searchedStrategies"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unparseable_json_body_is_missing_coordinates() {
    let server = MockServer::start().await;
    no_calls_expected(&server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/find-stores")
        .body(Body::from("lat=1"))
        .unwrap();
    let (status, _, _) = send(app(&server.uri(), Some("test-key")), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn photo_proxy_streams_image_with_cache_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/places/abc/photos/p1/media"))
        .and(query_param("maxHeightPx", "400"))
        .and(query_param("maxWidthPx", "400"))
        .and(header_eq("X-Goog-Api-Key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/api/get-photo?photoreference=places%2Fabc%2Fphotos%2Fp1")
        .body(Body::empty())
        .unwrap();
    let (status, body, headers) = send(app(&server.uri(), Some("test-key")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
}

#[tokio::test]
async fn photo_proxy_defaults_to_jpeg() {
    let server = MockServer::start().await;

    // No body, so the provider response carries no content type at all
    Mock::given(method("GET"))
        .and(path("/places/abc/photos/p1/media"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .uri("/api/get-photo?photoreference=places/abc/photos/p1")
        .body(Body::empty())
        .unwrap();
    let (status, body, headers) = send(app(&server.uri(), Some("test-key")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
}

#[tokio::test]
async fn photo_proxy_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/places/gone/photos/p1/media"))
        .respond_with(ResponseTemplate::new(404).set_body_string("photo not found"))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server.uri(), Some("test-key")), "/api/get-photo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Photo reference is required." }));

    let (status, body) = get_json(
        app(&server.uri(), Some("test-key")),
        "/api/get-photo?photoreference=a&photoreference=b",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = get_json(
        app(&server.uri(), None),
        "/api/get-photo?photoreference=places/gone/photos/p1",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Server configuration error. API key not found."
    );

    let (status, body) = get_json(
        app(&server.uri(), Some("test-key")),
        "/api/get-photo?photoreference=places/gone/photos/p1",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Failed to fetch photo: 404", "details": "photo not found" })
    );
}

#[tokio::test]
async fn test_api_reports_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{ "id": "r1", "displayName": { "text": "Katz's" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server.uri(), Some("test-key")), "/api/test-api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Places API (New) is working correctly!");
    assert_eq!(body["data"]["places"][0]["id"], "r1");
}

#[tokio::test]
async fn test_api_transport_failure() {
    let app = app("http://127.0.0.1:1", Some("test-key"));
    let (status, body) = get_json(app, "/api/test-api").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Test failed");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_api_non_json_body_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server.uri(), Some("test-key")), "/api/test-api").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Test failed");
}

#[tokio::test]
async fn health_check() {
    let (status, body) = get_json(app("http://127.0.0.1:1", None), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], comicfinder::VERSION);
}
