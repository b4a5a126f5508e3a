//! Application state shared by all handlers.

use uniicon_processing::{GenerationPipeline, NftPublisher};

pub struct AppState {
    pub pipeline: GenerationPipeline,
    /// `None` when no Pinata JWT is configured
    pub nft: Option<NftPublisher>,
}

impl AppState {
    pub fn new(pipeline: GenerationPipeline, nft: Option<NftPublisher>) -> Self {
        Self { pipeline, nft }
    }
}
