use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use proteus::config::Settings;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::util::ServiceExt; // for oneshot

fn test_app() -> axum::Router {
    let settings = Settings::from_file(Path::new("does-not-exist.toml")).unwrap();
    proteus::create_app(Arc::new(RwLock::new(settings)))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, body_json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body_json["status"], json!("healthy"));
}

#[tokio::test]
async fn test_generate_fills_skeleton() {
    let body = json!({
        "skeleton": {"user": {"email": "", "age": null}},
        "options": {"seed": 3}
    });

    let (status, response) = post_json(test_app(), "/api/generate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], json!(true));
    assert!(response["data"]["user"]["email"].as_str().unwrap().contains('@'));
    assert!(response["data"]["user"]["age"].is_i64());
    assert_eq!(response["metadata"]["itemCount"], json!(1));
    assert!(response["metadata"]["generatedAt"].is_string());
}

#[tokio::test]
async fn test_generate_missing_skeleton() {
    let (status, response) = post_json(test_app(), "/api/generate", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], json!(false));
    assert!(response["error"].as_str().unwrap().contains("skeleton"));
}

#[tokio::test]
async fn test_generate_deterministic_with_seed() {
    let body = json!({
        "skeleton": {"user": {"firstName": "", "age": null}},
        "options": {"seed": 7}
    });

    let (_, first) = post_json(test_app(), "/api/generate", body.clone()).await;
    let (_, second) = post_json(test_app(), "/api/generate", body).await;

    assert_eq!(first["data"], second["data"]);
}

#[tokio::test]
async fn test_generate_honors_schema_constraints() {
    let body = json!({
        "skeleton": {"User": {"age": null}},
        "swagger": {
            "definitions": {
                "User": {
                    "properties": {
                        "age": {"type": "integer", "minimum": 18, "maximum": 30}
                    }
                }
            }
        }
    });

    let (status, response) = post_json(test_app(), "/api/generate", body).await;

    assert_eq!(status, StatusCode::OK);
    let age = response["data"]["User"]["age"].as_i64().unwrap();
    assert!((18..=30).contains(&age));
}

#[tokio::test]
async fn test_generate_count_replicates_object_lists() {
    let body = json!({
        "skeleton": {"users": [{"name": "x", "email": ""}]},
        "options": {"count": 3}
    });

    let (status, response) = post_json(test_app(), "/api/generate", body).await;

    assert_eq!(status, StatusCode::OK);
    let users = response["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    // minimal replication: every item is a copy of the first
    assert_eq!(users[0], users[1]);
    assert_eq!(response["metadata"]["itemCount"], json!(3));
}

#[tokio::test]
async fn test_generate_count_refills_list_skeletons() {
    let body = json!({
        "skeleton": [{"id": null}],
        "options": {"count": 4}
    });

    let (status, response) = post_json(test_app(), "/api/generate", body).await;

    assert_eq!(status, StatusCode::OK);
    let items = response["data"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(response["metadata"]["itemCount"], json!(4));
}

#[tokio::test]
async fn test_anonymize_endpoint() {
    let body = json!({
        "data": {"email": "real.person@corp-internal.com", "count": 5}
    });

    let (status, response) = post_json(test_app(), "/api/anonymize", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], json!(true));
    assert_ne!(response["data"]["email"], json!("real.person@corp-internal.com"));
    assert_eq!(response["data"]["count"], json!(5));
}

#[tokio::test]
async fn test_anonymize_missing_data() {
    let (status, response) = post_json(test_app(), "/api/anonymize", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], json!(false));
}

#[tokio::test]
async fn test_analyze_endpoint() {
    let body = json!({
        "data": {"user": {"email": "a@b.c", "age": 30}}
    });

    let (status, response) = post_json(test_app(), "/api/analyze", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], json!(true));
    assert_eq!(response["totalFields"], json!(1));
    assert_eq!(response["sensitiveFields"][0], json!("user.email"));
}
