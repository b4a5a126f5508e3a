//! Result packaging: turns the final image into the client payload.

use uniicon_core::{ArchivedAsset, GeneratedImage, GenerationSource, ImageFormat, PipelineResult};

use crate::error::PackagingError;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

fn message_for(method: GenerationSource) -> &'static str {
    match method {
        GenerationSource::Service => "Icon generated successfully using AWS Bedrock.",
        GenerationSource::LocalFallback => "Icon generated successfully using fallback system.",
    }
}

fn verify_signature(image: &GeneratedImage) -> Result<(), PackagingError> {
    if image.is_empty() {
        return Err(PackagingError::EmptyBuffer);
    }

    let matches = match image.format {
        ImageFormat::Png => image.bytes.starts_with(PNG_SIGNATURE),
        ImageFormat::Svg => {
            let head = String::from_utf8_lossy(&image.bytes[..image.len().min(64)]);
            let head = head.trim_start();
            head.starts_with("<svg") || head.starts_with("<?xml")
        }
    };

    if matches {
        Ok(())
    } else {
        Err(PackagingError::SignatureMismatch(image.format))
    }
}

/// Build the client payload: a `data:` URL with the MIME type of the image
/// format, the raw base64, and the generation provenance.
pub fn package_result(
    image: &GeneratedImage,
    archived: Option<ArchivedAsset>,
    method: GenerationSource,
) -> Result<PipelineResult, PackagingError> {
    verify_signature(image)?;

    let base64 = image.to_base64();
    let display_url = format!("data:{};base64,{}", image.format.mime_type(), base64);

    Ok(PipelineResult {
        display_url,
        base64,
        format: image.format.as_str().to_string(),
        generation_method: method,
        archived_asset: archived,
        message: message_for(method).to_string(),
    })
}
