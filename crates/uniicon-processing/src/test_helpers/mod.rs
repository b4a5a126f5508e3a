//! Test helpers for pipeline unit tests
//!
//! In-memory doubles for the remote AI services, archive storage, the
//! rasterizer and the background remover, so the pipeline can be exercised
//! without network access. Enabled for downstream crates with the
//! `test-helpers` feature.

pub mod mock_services;
pub mod mock_storage;

pub use mock_services::*;
pub use mock_storage::*;

use async_trait::async_trait;
use bytes::Bytes;
use uniicon_core::GeneratedImage;

use crate::cleaner::BackgroundRemover;
use crate::error::CleaningError;
use crate::raster::{RasterError, Rasterizer};

/// Minimal buffer that passes the PNG signature check
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Rasterizer that returns [`PNG_BYTES`] for any document
pub struct StubRasterizer;

impl Rasterizer for StubRasterizer {
    fn rasterize(&self, svg: &str) -> Result<Bytes, RasterError> {
        if svg.is_empty() {
            return Err(RasterError::Parse("empty document".to_string()));
        }
        Ok(Bytes::from_static(PNG_BYTES))
    }
}

/// Rasterizer that always fails
pub struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, _svg: &str) -> Result<Bytes, RasterError> {
        Err(RasterError::Render("rasterizer unavailable".to_string()))
    }
}

/// Background remover that always fails
pub struct FailingRemover;

#[async_trait]
impl BackgroundRemover for FailingRemover {
    async fn remove_background(
        &self,
        _image: &GeneratedImage,
    ) -> Result<GeneratedImage, CleaningError> {
        Err(CleaningError::Failed("remover offline".to_string()))
    }
}
