//! Health and documentation endpoint tests.

mod helpers;

use helpers::TestAppBuilder;
use serde_json::Value;
use std::sync::Arc;
use uniicon_processing::test_helpers::{MockImageService, MockStorage};

#[tokio::test]
async fn test_health_reports_unconfigured_backends() {
    let server = TestAppBuilder::new().build();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["extraction"], false);
    assert_eq!(body["generation"], false);
    assert_eq!(body["archive"], false);
    assert_eq!(body["ipfs"], false);
    assert_eq!(body["fallbacks_disabled"], false);
}

#[tokio::test]
async fn test_health_reports_configured_backends() {
    let server = TestAppBuilder::new()
        .image_service(Arc::new(MockImageService::succeeding()))
        .storage(Arc::new(MockStorage::succeeding()))
        .fallbacks_disabled()
        .build();

    let body: Value = server.get("/health").await.json();

    assert_eq!(body["extraction"], false);
    assert_eq!(body["generation"], true);
    assert_eq!(body["archive"], true);
    assert_eq!(body["fallbacks_disabled"], true);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let server = TestAppBuilder::new().build();

    let response = server.get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/generate"]["post"].is_object());
    assert!(body["paths"]["/generate"]["get"]["responses"]["405"].is_object());
    assert!(body["paths"]["/nft"].is_object());
    assert!(body["paths"]["/health"].is_object());
}
