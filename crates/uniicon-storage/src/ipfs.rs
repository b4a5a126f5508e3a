//! IPFS pinning through the Pinata API.
//!
//! Used when publishing a generated icon as NFT metadata: the image is pinned
//! first, then a metadata JSON document that references it.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use uniicon_core::PinataConfig;

const PINATA_API_BASE: &str = "https://api.pinata.cloud";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// IPFS pinning errors
#[derive(Debug, Error)]
pub enum IpfsError {
    #[error("Pinata request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Pinata returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid Pinata response: {0}")]
    InvalidResponse(String),
}

pub type IpfsResult<T> = Result<T, IpfsError>;

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Pinata client
#[derive(Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    jwt: String,
    gateway: String,
    api_base: String,
}

impl PinataClient {
    pub fn new(config: &PinataConfig) -> IpfsResult<Self> {
        Self::with_api_base(config, PINATA_API_BASE)
    }

    /// Create a client that talks to a different API host (used by tests)
    pub fn with_api_base(config: &PinataConfig, api_base: &str) -> IpfsResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            jwt: config.jwt.clone(),
            gateway: config.gateway.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Public gateway URL for a CID
    pub fn gateway_url(&self, cid: &str) -> String {
        let gateway = self
            .gateway
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("https://{}/ipfs/{}", gateway, cid)
    }

    /// Pin a file and return its CID
    pub async fn pin_file(
        &self,
        data: Bytes,
        file_name: &str,
        content_type: &str,
    ) -> IpfsResult<String> {
        let part = Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("pinataMetadata", json!({ "name": file_name }).to_string())
            .text("pinataOptions", json!({ "cidVersion": 1 }).to_string());

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_base))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await?;

        let cid = Self::parse_pin_response(response).await?;
        tracing::info!(cid = %cid, file_name = %file_name, "Pinned file to IPFS");
        Ok(cid)
    }

    /// Pin a JSON document and return its CID
    pub async fn pin_json(&self, content: &Value, name: &str) -> IpfsResult<String> {
        let body = json!({
            "pinataContent": content,
            "pinataMetadata": { "name": name },
            "pinataOptions": { "cidVersion": 1 },
        });

        let response = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", self.api_base))
            .bearer_auth(&self.jwt)
            .json(&body)
            .send()
            .await?;

        let cid = Self::parse_pin_response(response).await?;
        tracing::info!(cid = %cid, name = %name, "Pinned JSON to IPFS");
        Ok(cid)
    }

    async fn parse_pin_response(response: reqwest::Response) -> IpfsResult<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IpfsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PinResponse = response
            .json()
            .await
            .map_err(|e| IpfsError::InvalidResponse(e.to_string()))?;
        Ok(parsed.ipfs_hash)
    }
}
