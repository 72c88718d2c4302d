#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use ecom_api::catalog::CatalogService;
use ecom_api::config::{ServerConfig, StoreConfig};
use ecom_api::router::build_app_router;
use ecom_api::state::AppState;
use ecom_db::store::{InMemoryProductStore, ProductStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Boundary used by [`MultipartBody`].
pub const BOUNDARY: &str = "ecom-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a 1 MiB body limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        store: StoreConfig::Memory,
    }
}

/// A fresh, empty in-memory store.
pub fn new_store() -> Arc<dyn ProductStore> {
    Arc::new(InMemoryProductStore::new())
}

/// Build the full application router over `store`.
///
/// Goes through the same `build_app_router` as `main.rs`, so tests exercise
/// the production middleware stack.
pub fn build_test_app(store: Arc<dyn ProductStore>) -> Router {
    let config = test_config();
    let state = AppState {
        catalog: CatalogService::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    post_multipart_raw(app, uri, body.finish()).await
}

pub async fn post_multipart_raw(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart builder
// ---------------------------------------------------------------------------

/// Hand-rolled `multipart/form-data` body using [`BOUNDARY`].
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the `product` JSON part.
    pub fn product(self, json: serde_json::Value) -> Self {
        self.part(
            "form-data; name=\"product\"",
            Some("application/json"),
            json.to_string().as_bytes(),
        )
    }

    /// Append the `imageFile` part.
    pub fn image(self, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.part(
            &format!("form-data; name=\"imageFile\"; filename=\"{file_name}\""),
            Some(content_type),
            data,
        )
    }

    /// Append a plain text part.
    pub fn text(self, name: &str, value: &str) -> Self {
        self.part(
            &format!("form-data; name=\"{name}\""),
            None,
            value.as_bytes(),
        )
    }

    fn part(mut self, disposition: &str, content_type: Option<&str>, data: &[u8]) -> Self {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        self.buf
            .extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
        if let Some(ct) = content_type {
            self.buf
                .extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        self.buf.extend_from_slice(b"\r\n");
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }

    /// The body as if the connection dropped inside the last part: the
    /// closing boundary never arrives.
    pub fn unterminated(self) -> Vec<u8> {
        let mut buf = self.buf;
        buf.truncate(buf.len().saturating_sub(2));
        buf
    }
}
