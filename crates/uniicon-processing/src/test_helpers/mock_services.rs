//! Mock prompt and image services

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uniicon_services::{
    ImageGenerationRequest, ImageService, ImageServiceError, PromptService, PromptServiceError,
};

use super::PNG_BYTES;

/// Prompt service returning a fixed outcome
pub struct MockPromptService {
    outcome: Result<String, PromptServiceError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockPromptService {
    pub fn succeeding(completion: &str) -> Self {
        Self {
            outcome: Ok(completion.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: PromptServiceError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PromptService for MockPromptService {
    fn name(&self) -> &str {
        "mock-prompt"
    }

    async fn extract(&self, _input: &str) -> Result<String, PromptServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

/// Image service returning a fixed outcome and recording requests
pub struct MockImageService {
    outcome: Result<Bytes, ImageServiceError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ImageGenerationRequest>>,
}

impl MockImageService {
    /// Returns a tiny PNG for every request
    pub fn succeeding() -> Self {
        Self::with_outcome(Ok(Bytes::from_static(PNG_BYTES)))
    }

    pub fn failing(error: ImageServiceError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<Bytes, ImageServiceError>) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ImageGenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageService for MockImageService {
    fn name(&self) -> &str {
        "mock-image"
    }

    async fn generate(&self, request: &ImageGenerationRequest) -> Result<Bytes, ImageServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}
