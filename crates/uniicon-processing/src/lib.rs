//! Uniicon Processing Library
//!
//! The icon generation pipeline: prompt extraction, image generation with local
//! icon synthesis, background cleaning, archival and result packaging, composed
//! by [`GenerationPipeline`] under a single [`FallbackPolicy`]. Also hosts the
//! NFT publisher that pins finished icons to IPFS.

pub mod archiver;
pub mod cleaner;
pub mod error;
pub mod extract;
pub mod generate;
pub mod icon;
pub mod nft;
pub mod packager;
pub mod pipeline;
pub mod policy;
pub mod raster;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used types
pub use archiver::Archiver;
pub use cleaner::{BackgroundCleaner, BackgroundRemover};
pub use error::{CleaningError, PackagingError, PipelineError, PipelineFailure, Stage};
pub use extract::PromptExtractor;
pub use generate::ImageGenerator;
pub use icon::{Archetype, ColorPair, FallbackIcon};
pub use nft::{build_metadata, DataUrl, NftError, NftPublisher, PublishedNft};
pub use packager::package_result;
pub use pipeline::{GenerationPipeline, PipelineRun, PipelineState};
pub use policy::FallbackPolicy;
pub use raster::{RasterError, Rasterizer};
#[cfg(feature = "rasterize")]
pub use raster::ResvgRasterizer;
