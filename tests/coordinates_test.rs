mod common;

use common::{spawn_app, FakeRunner};
use dance_backend::domain::model::ServiceKind;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

async fn media_app(temp_dir: &TempDir) -> String {
    spawn_app(
        ServiceKind::Media,
        temp_dir.path().to_str().unwrap(),
        Arc::new(FakeRunner::succeeding("")),
    )
    .await
}

#[tokio::test]
async fn test_average_visibility() {
    let temp_dir = TempDir::new().unwrap();
    let base = media_app(&temp_dir).await;

    let response = reqwest::Client::new()
        .post(format!("{}/coordinates", base))
        .json(&json!({"landmarks": [
            {"x": 0.1, "y": 0.2, "z": 0.0, "visibility": 0.5},
            {"x": 0.3, "y": 0.4, "z": 0.0, "visibility": 1.0}
        ]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Coordinates received successfully!");
    assert_eq!(body["avg_visibility"], 0.75);
}

#[tokio::test]
async fn test_missing_data_and_landmarks() {
    let temp_dir = TempDir::new().unwrap();
    let base = media_app(&temp_dir).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/coordinates", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No data provided");

    let response = client
        .post(format!("{}/coordinates", base))
        .json(&json!({"landmarks": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No landmarks provided");

    let response = client.post(format!("{}/coordinates", base)).send().await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_malformed_landmark_is_500_with_details() {
    let temp_dir = TempDir::new().unwrap();
    let base = media_app(&temp_dir).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/coordinates", base))
        .json(&json!({"landmarks": [{"visibility": 0.5}, {"x": 1.0}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "An error occurred");
    assert!(body["details"].as_str().unwrap().contains("visibility"));

    let response = client
        .post(format!("{}/coordinates", base))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "An error occurred");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let temp_dir = TempDir::new().unwrap();
    let base = media_app(&temp_dir).await;

    let response = reqwest::Client::new()
        .post(format!("{}/coordinates", base))
        .header("Origin", "http://localhost:5173")
        .json(&json!({"landmarks": [{"visibility": 1}]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("access-control-allow-origin"));
}
