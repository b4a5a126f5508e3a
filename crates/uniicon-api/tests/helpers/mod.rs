//! Test helpers: build AppState and router for integration tests.
//!
//! Remote services and storage are in-memory doubles, so these tests need no
//! credentials or network access (the Pinata tests use a local mockito server).

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use uniicon_api::setup::routes;
use uniicon_api::AppState;
use uniicon_core::{Config, PinataConfig};
use uniicon_processing::{
    Archiver, BackgroundCleaner, FallbackPolicy, GenerationPipeline, ImageGenerator, NftPublisher,
    PromptExtractor,
};
use uniicon_services::{ImageService, PromptService};
use uniicon_storage::{PinataClient, Storage};

const STAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder for the app under test; everything starts unconfigured.
#[derive(Default)]
pub struct TestAppBuilder {
    prompt: Option<Arc<dyn PromptService>>,
    image: Option<Arc<dyn ImageService>>,
    storage: Option<Arc<dyn Storage>>,
    pinata_api_base: Option<String>,
    disable_fallbacks: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt_service(mut self, service: Arc<dyn PromptService>) -> Self {
        self.prompt = Some(service);
        self
    }

    pub fn image_service(mut self, service: Arc<dyn ImageService>) -> Self {
        self.image = Some(service);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn pinata(mut self, api_base: &str) -> Self {
        self.pinata_api_base = Some(api_base.to_string());
        self
    }

    pub fn fallbacks_disabled(mut self) -> Self {
        self.disable_fallbacks = true;
        self
    }

    pub fn build(self) -> TestServer {
        let pipeline = GenerationPipeline::new(
            PromptExtractor::new(self.prompt, STAGE_TIMEOUT),
            ImageGenerator::new(self.image, STAGE_TIMEOUT),
            BackgroundCleaner::disabled(),
            Archiver::new(self.storage, STAGE_TIMEOUT),
            FallbackPolicy::new(self.disable_fallbacks),
        );

        let nft = self.pinata_api_base.map(|api_base| {
            let config = PinataConfig {
                jwt: "test-jwt".to_string(),
                gateway: "gateway.pinata.cloud".to_string(),
            };
            NftPublisher::new(
                PinataClient::with_api_base(&config, &api_base)
                    .expect("Failed to build Pinata client"),
            )
        });

        let config = Config::from_lookup(|_| None).expect("Default config must parse");
        let state = Arc::new(AppState::new(pipeline, nft));
        let app = routes::setup_routes(&config, state).expect("Failed to build router");

        TestServer::new(app.into_make_service()).expect("Failed to create test server")
    }
}
