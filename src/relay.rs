use serde::Deserialize;
use serde_json::Value;

use crate::error::RelayError;
use crate::services::SkinAnalysisService;

/// Largest request body the relay accepts (a phone photo as a data URL)
pub const MAX_PAYLOAD_BYTES: usize = 6 * 1024 * 1024;

/// Directory holding the browser client
pub const STATIC_DIR: &str = "public";

/// Browser request body for `/api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "imageBase64", default)]
    pub image_base64: Option<String>,
}

/// Drop a `data:image/jpeg;base64,` style prefix. Input without a comma is taken as raw base64.
pub fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once(',') {
        Some((_, payload)) => payload,
        None => image,
    }
}

/// Validate a browser request and forward its image to the analysis provider.
/// The provider's JSON is returned untouched.
pub async fn handle_analyze_request(
    analysis: &dyn SkinAnalysisService,
    body: &str,
) -> Result<Value, RelayError> {
    if body.trim().is_empty() {
        return Err(RelayError::MissingInput);
    }

    let request: AnalyzeRequest =
        serde_json::from_str(body).map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

    let image = request.image_base64.unwrap_or_default();
    let payload = strip_data_url_prefix(&image);
    if payload.is_empty() {
        return Err(RelayError::MissingInput);
    }

    log::info!("📸 Relaying image for analysis ({} bytes received)", image.len());

    analysis.analyze(payload).await
}

#[cfg(feature = "relay-server")]
pub mod server {
    use super::*;
    use axum::{
        extract::{rejection::StringRejection, DefaultBodyLimit, State},
        routing::{get, post},
        Json, Router,
    };
    use std::path::Path;
    use std::sync::Arc;
    use tower_http::services::{ServeDir, ServeFile};

    use crate::handlers::Report;
    use crate::models::AnalysisResponse;

    pub struct AppState {
        pub analysis: Arc<dyn SkinAnalysisService>,
    }

    pub fn create_relay_router(
        analysis: Arc<dyn SkinAnalysisService>,
        static_dir: impl AsRef<Path>,
    ) -> Router {
        let static_dir = static_dir.as_ref();
        let state = Arc::new(AppState { analysis });

        Router::new()
            .route("/api/analyze", post(analyze_handler))
            .route("/api/report", post(report_handler))
            .route("/health", get(health_check))
            .route_service("/", ServeFile::new(static_dir.join("index.html")))
            .fallback_service(ServeDir::new(static_dir))
            .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
            .with_state(state)
    }

    async fn analyze_handler(
        State(state): State<Arc<AppState>>,
        body: Result<String, StringRejection>,
    ) -> Result<Json<Value>, RelayError> {
        let body = body?;
        let result = handle_analyze_request(state.analysis.as_ref(), &body).await?;
        log::info!("✅ Analysis relayed");
        Ok(Json(result))
    }

    /// Render a provider response (as received by the browser) into text
    async fn report_handler(
        body: Result<String, StringRejection>,
    ) -> Result<Json<Report>, RelayError> {
        let body = body?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

        let response = AnalysisResponse::from_value(value);
        if let Some(message) = &response.error_message {
            log::warn!("⚠️ Rendering report for failed analysis: {}", message);
        }

        Ok(Json(Report::from_response(&response)))
    }

    async fn health_check() -> &'static str {
        "OK"
    }
}


#[cfg(all(test, feature = "relay-server"))]
mod server_tests {
    use super::server::create_relay_router;
    use super::tests::MockAnalysis;
    use super::MAX_PAYLOAD_BYTES;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn static_fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skin-relay-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Skin Analyzer</h1>").unwrap();
        std::fs::write(dir.join("script.js"), "console.log('hi');").unwrap();
        dir
    }

    fn router(mock: Arc<MockAnalysis>, name: &str) -> Router {
        create_relay_router(mock, static_fixture(name))
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn read_body(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn test_analyze_returns_provider_json() {
        let provider = json!({ "request_id": "r1", "result": { "acne": { "value": 1 } } });
        let mock = Arc::new(MockAnalysis::replying(provider.clone()));
        let app = router(mock.clone(), "analyze-ok");

        let response = app
            .oneshot(post_json("/api/analyze", r#"{"imageBase64":"data:image/jpeg;base64,QUJD"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body, provider);
        assert_eq!(mock.received().as_deref(), Some("QUJD"));
    }

    #[tokio::test]
    async fn test_analyze_without_image_is_400() {
        let app = router(Arc::new(MockAnalysis::replying(json!({}))), "analyze-missing");

        let response = app.oneshot(post_json("/api/analyze", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body, json!({ "error": "No image supplied" }));
    }

    #[tokio::test]
    async fn test_analyze_transport_failure_is_500() {
        let app = router(Arc::new(MockAnalysis::failing("dns error")), "analyze-fail");

        let response = app
            .oneshot(post_json("/api/analyze", r#"{"imageBase64":"QUJD"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body, json!({ "error": "dns error" }));
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_body() {
        let mock = Arc::new(MockAnalysis::replying(json!({})));
        let app = router(mock.clone(), "analyze-large");
        let body = format!(r#"{{"imageBase64":"{}"}}"#, "A".repeat(MAX_PAYLOAD_BYTES + 1));

        let response = app.oneshot(post_json("/api/analyze", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body, json!({ "error": "Image exceeds the 6 MiB upload limit" }));
        assert!(mock.received().is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8_body_is_json_400() {
        let mock = Arc::new(MockAnalysis::replying(json!({})));

        for uri in ["/api/analyze", "/api/report"] {
            let app = router(mock.clone(), "invalid-utf8");
            let response = app
                .oneshot(post_json(uri, vec![0xffu8, 0xfe, 0x7b]))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
            assert!(body["error"].as_str().unwrap().starts_with("Invalid request body:"));
        }
        assert!(mock.received().is_none());
    }

    #[tokio::test]
    async fn test_report_renders_text() {
        let app = router(Arc::new(MockAnalysis::replying(json!({}))), "report");
        let provider = json!({ "result": { "acne": { "value": 2 }, "skin_type": { "skin_type": 1 } } });

        let response = app
            .oneshot(post_json("/api/report", provider.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(body["summary"].as_str().unwrap().starts_with("Your skin type is Dry.\nAcne level: Moderate."));
        assert_eq!(
            body["recommendations"],
            "Acne Care: Moderate acne. Use gentle exfoliants and consult dermatologist for retinoid treatments.\n\n\
             Skin Type Care: Use rich, hydrating moisturizers containing hyaluronic acid or ceramides."
        );
    }

    #[tokio::test]
    async fn test_report_for_provider_error() {
        let app = router(Arc::new(MockAnalysis::replying(json!({}))), "report-error");

        let response = app
            .oneshot(post_json("/api/report", r#"{"error_message":"NO_FACE_FOUND"}"#))
            .await
            .unwrap();

        let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body, json!({ "summary": "No analysis data available.", "recommendations": "" }));
    }

    #[tokio::test]
    async fn test_report_rejects_non_json() {
        let app = router(Arc::new(MockAnalysis::replying(json!({}))), "report-bad");

        let response = app.oneshot(post_json("/api/report", "<html>")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_serves_index_and_assets() {
        let app = router(Arc::new(MockAnalysis::replying(json!({}))), "static");

        let index = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(index.status(), StatusCode::OK);
        assert_eq!(read_body(index).await, b"<h1>Skin Analyzer</h1>");

        let script = app
            .clone()
            .oneshot(Request::builder().uri("/script.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(script.status(), StatusCode::OK);

        let health = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(read_body(health).await, b"OK");
    }
}
