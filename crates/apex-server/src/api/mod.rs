mod report;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::Semaphore;
use tower_http::trace::TraceLayer;

use apex_fetch::ImageResolver;
use apex_pdf::PdfEngine;

/// Maximum accepted request body: reports can carry sizeable inline payloads.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ImageResolver>,
    pub engine: Arc<dyn PdfEngine>,
    /// Bounds how many PDF exports run at once; excess requests queue FIFO
    /// for a permit instead of being rejected.
    pub render_permits: Arc<Semaphore>,
}

impl AppState {
    #[must_use]
    pub fn new(
        resolver: ImageResolver,
        engine: Arc<dyn PdfEngine>,
        max_concurrent_renders: usize,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            engine,
            render_permits: Arc::new(Semaphore::new(max_concurrent_renders)),
        }
    }
}

/// Client error: the payload failed validation. Maps to 400.
#[derive(Debug, Serialize)]
pub struct ValidationError {
    pub error: String,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Server error: the render/export pipeline failed. Maps to 500 and carries
/// the underlying message for the caller.
#[derive(Debug, Serialize)]
pub struct PipelineError {
    pub error: String,
    pub details: String,
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/generate-pdf", post(report::generate_pdf))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "apex report service is running"
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use apex_pdf::PdfError;

    use super::*;

    /// 1x1 transparent PNG fixture.
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    /// Fault-injectable engine standing in for the Chromium exporter.
    ///
    /// Records how often it was invoked and the last document it received so
    /// tests can verify both the no-side-effect contract of validation
    /// failures and the content of the rendered document.
    struct StubEngine {
        calls: AtomicUsize,
        last_html: Mutex<Option<String>>,
        fail_with: Option<String>,
    }

    impl StubEngine {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_html: Mutex::new(None),
                fail_with: None,
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_html: Mutex::new(None),
                fail_with: Some(message.to_owned()),
            })
        }
    }

    #[async_trait]
    impl PdfEngine for StubEngine {
        async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_html.lock().expect("stub lock") = Some(html.to_owned());
            match &self.fail_with {
                Some(message) => Err(PdfError::Launch(message.clone())),
                None => Ok(b"%PDF-1.7 stub".to_vec()),
            }
        }
    }

    fn test_state(engine: Arc<StubEngine>) -> AppState {
        let resolver = ImageResolver::new(5, "apex-test/0.1").expect("test resolver");
        AppState::new(resolver, engine, 2)
    }

    fn valid_payload(logo_urls: &[&str]) -> serde_json::Value {
        let competitors: Vec<serde_json::Value> = logo_urls
            .iter()
            .enumerate()
            .map(|(i, logo_url)| {
                json!({
                    "name": format!("Competitor {i}"),
                    "url": format!("https://competitor-{i}.example.com"),
                    "logoUrl": logo_url,
                    "topDeals": [{"name": "Bundle", "salePrice": 19.99}]
                })
            })
            .collect();
        let comparison: Vec<serde_json::Value> = (0..logo_urls.len())
            .map(|i| {
                json!({
                    "competitorName": format!("Competitor {i}"),
                    "dealRating": "hot",
                    "analysis": {"good": ["aggressive bundles"], "bad": []}
                })
            })
            .collect();
        json!({
            "finalReport": {
                "recommendation": {
                    "numericScore": 7.0,
                    "rating": "Favorable",
                    "summary": "Well positioned."
                },
                "comparison": comparison
            },
            "clientInfo": {"name": "Client Co"},
            "competitorData": competitors,
            "clientUrl": "https://www.client.example.com"
        })
    }

    fn post_json(payload: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate-pdf")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn liveness_returns_ok() {
        let app = build_app(test_state(StubEngine::succeeding()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(String::from_utf8_lossy(&body).contains("running"));
    }

    #[tokio::test]
    async fn missing_client_url_returns_400_with_no_side_effects() {
        // Mock server with zero expected requests: a validation failure must
        // never trigger an image fetch.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let engine = StubEngine::succeeding();
        let app = build_app(test_state(Arc::clone(&engine)));

        let mut payload = valid_payload(&[&format!("{}/logo.png", server.uri())]);
        payload
            .as_object_mut()
            .expect("object payload")
            .remove("clientUrl");

        let response = app.oneshot(post_json(&payload)).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert!(
            json["error"].as_str().is_some_and(|e| !e.is_empty()),
            "400 body must carry an error message, got: {json}"
        );
        assert_eq!(
            engine.calls.load(Ordering::SeqCst),
            0,
            "no browser launch on validation failure"
        );
        // server.verify() on drop asserts the expect(0) mock.
    }

    #[tokio::test]
    async fn non_json_body_returns_400() {
        let app = build_app(test_state(StubEngine::succeeding()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-pdf")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn degraded_logo_still_returns_pdf() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/good.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(PNG_BYTES)
                    .insert_header("Content-Type", "image/png"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/unreachable.png"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let engine = StubEngine::succeeding();
        let app = build_app(test_state(Arc::clone(&engine)));

        let payload = valid_payload(&[
            &format!("{}/good.png", server.uri()),
            &format!("{}/unreachable.png", server.uri()),
        ]);
        let response = app.oneshot(post_json(&payload)).await.expect("response");

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "an unreachable logo must not fail the request"
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/pdf")
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .expect("content-disposition header");
        assert!(
            disposition.starts_with("attachment; filename=\"apex-report-"),
            "unexpected disposition: {disposition}"
        );
        assert!(disposition.ends_with(".pdf\""));

        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(body.starts_with(b"%PDF"), "body should be the engine's PDF bytes");

        // The rendered document embedded the good logo and used the
        // placeholder for the unreachable one.
        let html = engine
            .last_html
            .lock()
            .expect("stub lock")
            .clone()
            .expect("engine received a document");
        assert!(html.contains("data:image/png;base64,"));
        assert!(html.contains("No Logo"));
    }

    #[tokio::test]
    async fn engine_failure_returns_500_with_details() {
        let engine = StubEngine::failing("chrome exploded");
        let app = build_app(test_state(Arc::clone(&engine)));

        let response = app
            .oneshot(post_json(&valid_payload(&[])))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(
            json["details"]
                .as_str()
                .is_some_and(|d| d.contains("chrome exploded")),
            "details should carry the underlying message, got: {json}"
        );
        assert_eq!(
            engine.calls.load(Ordering::SeqCst),
            1,
            "the engine was invoked exactly once, with no retry"
        );
    }

    #[tokio::test]
    async fn validation_error_shape_matches_contract() {
        let response = ValidationError {
            error: "missing field".to_owned(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pipeline_error_shape_matches_contract() {
        let response = PipelineError {
            error: "failed".to_owned(),
            details: "boom".to_owned(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
