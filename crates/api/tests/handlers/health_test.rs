use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_needs_no_token() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "ok", "service": "meets-api" })
    );

    let response = server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["version"], "0.1.0");
}
