//! Integration tests for the CareerAgent AI server HTTP API.
//!
//! These drive the full router (including the CORS layer) through
//! `tower::ServiceExt::oneshot`, without binding a socket.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use careeragent_ai_server::api::{create_router, AppState};

/// Build a ready router with fresh state.
fn test_app() -> axum::Router {
    let state = AppState::new();
    state.set_ready(true);
    create_router(state)
}

/// POST a JSON body to /predict.
fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_returns_running_banner() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"CareerAgent AI Server is running!");
}

#[tokio::test]
async fn root_ignores_query_parameters_and_headers() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/?debug=1&x=y")
                .header("x-custom-header", "anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn predict_empty_object_returns_placeholder() {
    let response = test_app().oneshot(predict_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"prediction": "dummy prediction"})
    );
}

#[tokio::test]
async fn predict_output_is_invariant_under_input() {
    let payloads = [
        r#"{"foo": "bar", "nested": {"x": 1}}"#,
        r#"[1, 2, 3]"#,
        r#""just a string""#,
        r#"{"cv": "10 years of Rust", "job_id": 42}"#,
    ];

    for payload in payloads {
        let response = test_app().oneshot(predict_request(payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"prediction": "dummy prediction"})
        );
    }
}

#[tokio::test]
async fn predict_rejects_malformed_json() {
    let response = test_app()
        .oneshot(predict_request("{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn predict_requires_json_content_type() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/predict")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn get_predict_is_method_not_allowed() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/predict")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn post_root_is_method_not_allowed() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_permissive_cors_headers() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap()),
        Some("*")
    );
}

#[tokio::test]
async fn preflight_allows_any_origin_and_method() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/predict")
                .header(header::ORIGIN, "http://another-origin.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap()),
        Some("*")
    );
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn status_reports_predictions_served() {
    let app = test_app();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(predict_request("{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "running");
    assert_eq!(json["predictions_served"], 2);
    assert!(json["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
