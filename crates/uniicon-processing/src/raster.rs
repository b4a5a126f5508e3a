//! SVG rasterization for fallback icons.

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid SVG: {0}")]
    Parse(String),

    #[error("Rasterization failed: {0}")]
    Render(String),
}

/// Converts an SVG document into PNG bytes
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, svg: &str) -> Result<Bytes, RasterError>;
}

#[cfg(feature = "rasterize")]
pub use resvg_impl::ResvgRasterizer;

#[cfg(feature = "rasterize")]
mod resvg_impl {
    use super::{RasterError, Rasterizer};
    use bytes::Bytes;
    use resvg::{tiny_skia, usvg};

    /// Rasterizer backed by resvg, with system fonts loaded for captions
    pub struct ResvgRasterizer {
        options: usvg::Options<'static>,
    }

    impl ResvgRasterizer {
        pub fn new() -> Self {
            let mut options = usvg::Options::default();
            options.fontdb_mut().load_system_fonts();
            Self { options }
        }
    }

    impl Default for ResvgRasterizer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Rasterizer for ResvgRasterizer {
        fn rasterize(&self, svg: &str) -> Result<Bytes, RasterError> {
            let tree = usvg::Tree::from_str(svg, &self.options)
                .map_err(|e| RasterError::Parse(e.to_string()))?;

            let size = tree.size().to_int_size();
            let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
                .ok_or_else(|| RasterError::Render("zero-sized canvas".to_string()))?;

            resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

            let png = pixmap
                .encode_png()
                .map_err(|e| RasterError::Render(e.to_string()))?;
            Ok(Bytes::from(png))
        }
    }

}
