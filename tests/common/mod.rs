//! Common Test Utilities

use axum::{body::Body, http::Request, response::Response, Router};
use serde_json::Value;
use tower::ServiceExt;

/// Drive a router with a single request.
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    router.clone().oneshot(request).await.unwrap()
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
