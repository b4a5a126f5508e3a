//! NFT publishing: pins a finished icon and its ERC-721 metadata to IPFS.

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use uniicon_core::{NftAttribute, NftMetadata};
use uniicon_storage::{IpfsError, PinataClient};

const DEFAULT_NAME: &str = "Uniicon Generated Icon";
const DEFAULT_DESCRIPTION: &str = "AI-generated animated icon created with Uniicon on Avalanche";
const EXTERNAL_URL: &str = "https://uniicon.com";

#[derive(Debug, Error)]
pub enum NftError {
    #[error("Invalid image data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Image upload failed: {0}")]
    ImagePin(#[source] IpfsError),

    #[error("Metadata upload failed: {0}")]
    MetadataPin(#[source] IpfsError),

    #[error("Metadata encoding failed: {0}")]
    MetadataEncoding(#[from] serde_json::Error),
}

/// Decoded `data:<mime>;base64,<payload>` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl DataUrl {
    pub fn parse(value: &str) -> Result<Self, NftError> {
        let rest = value
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| NftError::InvalidDataUrl("missing data: prefix".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| NftError::InvalidDataUrl("missing payload separator".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| NftError::InvalidDataUrl("payload is not base64".to_string()))?;
        if mime_type.is_empty() {
            return Err(NftError::InvalidDataUrl("missing MIME type".to_string()));
        }

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| NftError::InvalidDataUrl(e.to_string()))?;
        if bytes.is_empty() {
            return Err(NftError::InvalidDataUrl("empty payload".to_string()));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes: Bytes::from(bytes),
        })
    }

    fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/svg+xml" => "svg",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// What a successful publish returns
#[derive(Debug, Clone)]
pub struct PublishedNft {
    pub image_url: String,
    pub metadata_url: String,
    /// URI handed to the minting contract
    pub token_uri: String,
    pub metadata: NftMetadata,
}

/// Build token metadata with the standard Uniicon attributes first
pub fn build_metadata(
    image_url: &str,
    name: Option<&str>,
    description: Option<&str>,
    extra: Vec<NftAttribute>,
) -> NftMetadata {
    let mut attributes = vec![
        NftAttribute::new("Generator", "Uniicon AI"),
        NftAttribute::new("Blockchain", "Avalanche"),
        NftAttribute::new(
            "Created",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    ];
    attributes.extend(extra);

    NftMetadata {
        name: name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_NAME)
            .to_string(),
        description: description
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        image: image_url.to_string(),
        external_url: EXTERNAL_URL.to_string(),
        attributes,
    }
}

pub struct NftPublisher {
    client: PinataClient,
}

impl NftPublisher {
    pub fn new(client: PinataClient) -> Self {
        Self { client }
    }

    /// Pin the image, then metadata referencing it
    pub async fn publish(
        &self,
        image: DataUrl,
        name: Option<&str>,
        description: Option<&str>,
        attributes: Vec<NftAttribute>,
    ) -> Result<PublishedNft, NftError> {
        let created = Utc::now().timestamp_millis();
        let file_name = format!("uniicon-generated-{}.{}", created, image.file_extension());

        let image_cid = self
            .client
            .pin_file(image.bytes, &file_name, &image.mime_type)
            .await
            .map_err(NftError::ImagePin)?;
        let image_url = self.client.gateway_url(&image_cid);

        let metadata = build_metadata(&image_url, name, description, attributes);
        let metadata_value = serde_json::to_value(&metadata)?;

        let metadata_cid = self
            .client
            .pin_json(&metadata_value, &format!("Uniicon NFT Metadata - {}", created))
            .await
            .map_err(NftError::MetadataPin)?;
        let metadata_url = self.client.gateway_url(&metadata_cid);

        tracing::info!(
            image_cid = %image_cid,
            metadata_cid = %metadata_cid,
            "NFT assets pinned to IPFS"
        );

        Ok(PublishedNft {
            image_url,
            token_uri: metadata_url.clone(),
            metadata_url,
            metadata,
        })
    }
}
