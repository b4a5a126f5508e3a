//! Icon generation API integration tests.
//!
//! Run with: `cargo test -p uniicon-api --test generate_test`

mod helpers;

use helpers::TestAppBuilder;
use serde_json::{json, Value};
use std::sync::Arc;
use uniicon_processing::test_helpers::{MockImageService, MockPromptService, MockStorage};
use uniicon_services::{ImageServiceError, PromptServiceError};

#[tokio::test]
async fn test_generate_without_credentials_uses_fallback_icon() {
    let server = TestAppBuilder::new().build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a blue water droplet" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let result = &body["result"];
    assert_eq!(result["generationMethod"], "local-fallback");
    assert_eq!(result["format"], "svg");
    assert!(result["displayUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
    assert!(result["archivedAsset"].is_null());
    assert_eq!(
        result["message"],
        "Icon generated successfully using fallback system."
    );
}

#[tokio::test]
async fn test_generate_with_services_returns_png_and_archives() {
    let prompt = Arc::new(MockPromptService::succeeding("a glossy blue droplet"));
    let image = Arc::new(MockImageService::succeeding());
    let storage = Arc::new(MockStorage::succeeding());
    let server = TestAppBuilder::new()
        .prompt_service(prompt.clone())
        .image_service(image.clone())
        .storage(storage.clone())
        .build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a water drop" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let result = &body["result"];
    assert_eq!(result["generationMethod"], "service");
    assert_eq!(result["format"], "png");
    assert!(result["displayUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert_eq!(result["archivedAsset"]["bucket"], "test-bucket");

    assert_eq!(prompt.calls(), 1);
    assert_eq!(image.requests()[0].prompt, "a glossy blue droplet");
    assert_eq!(storage.uploads().len(), 1);
}

#[tokio::test]
async fn test_archive_failure_still_returns_icon() {
    let server = TestAppBuilder::new()
        .storage(Arc::new(MockStorage::failing()))
        .build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "home" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["result"]["archivedAsset"].is_null());
}

#[tokio::test]
async fn test_get_generate_is_method_not_allowed() {
    let server = TestAppBuilder::new().build();

    let response = server.get("/generate").await;

    assert_eq!(response.status_code(), 405);
    assert_eq!(response.text(), "Method Not Allowed");
}

#[tokio::test]
async fn test_empty_input_is_bad_request() {
    let server = TestAppBuilder::new().build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "   " }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("non-empty"));
    assert!(body["hint"].is_string());
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = TestAppBuilder::new().build();

    let response = server
        .post("/generate")
        .json(&json!({ "prompt": "missing input field" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_disabled_fallbacks_without_credentials_fails_at_extraction() {
    let server = TestAppBuilder::new().fallbacks_disabled().build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a star" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["stage"], "extracting");
    assert!(body["hint"].as_str().unwrap().contains("AWS_ACCESS_KEY_ID"));
}

#[tokio::test]
async fn test_disabled_fallbacks_surfaces_extraction_failure() {
    let server = TestAppBuilder::new()
        .prompt_service(Arc::new(MockPromptService::failing(
            PromptServiceError::Unavailable("agent unreachable".to_string()),
        )))
        .image_service(Arc::new(MockImageService::succeeding()))
        .fallbacks_disabled()
        .build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a star" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["stage"], "extracting");
    assert_eq!(
        body["hint"],
        "Set DISABLE_FALLBACKS=0 to enable graceful fallbacks."
    );
}

#[tokio::test]
async fn test_throttling_is_never_substituted() {
    let server = TestAppBuilder::new()
        .prompt_service(Arc::new(MockPromptService::succeeding("a star")))
        .image_service(Arc::new(MockImageService::failing(
            ImageServiceError::Throttled,
        )))
        .build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a star" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["stage"], "generating");
    assert!(body["hint"].as_str().unwrap().contains("rate limiting"));
}

#[tokio::test]
async fn test_access_denied_gets_iam_hint_when_fallbacks_disabled() {
    let server = TestAppBuilder::new()
        .prompt_service(Arc::new(MockPromptService::succeeding("a heart")))
        .image_service(Arc::new(MockImageService::failing(
            ImageServiceError::AccessDenied(
                "User is not authorized to perform: bedrock:InvokeModel".to_string(),
            ),
        )))
        .fallbacks_disabled()
        .build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a heart" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["stage"], "generating");
    assert!(body["hint"].as_str().unwrap().contains("IAM policy"));
    assert!(body["error"].as_str().unwrap().contains("Access Denied"));
}

#[tokio::test]
async fn test_access_denied_falls_back_when_enabled() {
    let server = TestAppBuilder::new()
        .prompt_service(Arc::new(MockPromptService::succeeding("a heart")))
        .image_service(Arc::new(MockImageService::failing(
            ImageServiceError::AccessDenied("denied".to_string()),
        )))
        .build();

    let response = server
        .post("/generate")
        .json(&json!({ "input": "a heart" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["result"]["generationMethod"], "local-fallback");
}
