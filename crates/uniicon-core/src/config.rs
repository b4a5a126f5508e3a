//! Configuration module
//!
//! Typed configuration for the generation service, loaded from the process
//! environment (and `.env` when present). Credential presence decides which
//! pipeline stages run their remote primary path.

use std::env;
use std::time::Duration;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 3000;
const DEFAULT_REGION: &str = "us-east-1";
const GENERATE_MODEL_ID: &str = "amazon.titan-image-generator-v1";
const AGENT_ID: &str = "AIN8HDRSBV";
const AGENT_ALIAS_ID: &str = "6QBYKHARVB";
const S3_BUCKET: &str = "uniicon-assets-dev";
const STAGE_TIMEOUT_SECS: u64 = 60;
const PINATA_GATEWAY: &str = "gateway.pinata.cloud";
const MAX_REQUEST_BODY_BYTES: usize = 20 * 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 1_000;

/// AWS credential pair, resolved from the `AWS_*` or `BEDROCK_*` variables.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Bedrock (prompt extraction agent and image model) configuration
#[derive(Clone, Debug)]
pub struct BedrockConfig {
    pub region: String,
    /// `None` disables both remote primaries; the pipeline goes straight to fallbacks
    pub credentials: Option<AwsCredentials>,
    pub generate_model_id: String,
    pub agent_id: String,
    pub agent_alias_id: String,
}

/// Archive storage configuration
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub s3_endpoint: Option<String>,
    /// Storage credentials; S3 archival is skipped without them
    pub credentials: Option<AwsCredentials>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl StorageConfig {
    /// Whether archival should be attempted at all
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StorageBackend::S3 => self.credentials.is_some(),
            StorageBackend::Local => self.local_storage_path.is_some(),
        }
    }
}

/// IPFS pinning (Pinata) configuration for NFT publishing
#[derive(Clone)]
pub struct PinataConfig {
    pub jwt: String,
    pub gateway: String,
}

impl std::fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataConfig")
            .field("jwt", &"<redacted>")
            .field("gateway", &self.gateway)
            .finish()
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Suppress every fallback substitution; stage failures become hard failures
    pub disable_fallbacks: bool,
    pub quiet_logs: bool,
    pub stage_timeout: Duration,
    /// Rasterize fallback SVG icons to PNG (needs the `rasterize` feature)
    pub fallback_rasterize: bool,
    pub max_request_body_bytes: usize,
    pub http_concurrency_limit: usize,
    pub bedrock: BedrockConfig,
    pub storage: StorageConfig,
    pub pinata: Option<PinataConfig>,
}

/// Parse a boolean-like flag: `1`, `true`, `yes` and `on` are true.
pub fn parse_flag(value: Option<String>) -> bool {
    value
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        let first = |keys: &[&str]| keys.iter().find_map(|k| get(k));

        let environment = first(&["ENVIRONMENT", "APP_ENV"])
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match get("SERVER_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid port number"))?,
            None => SERVER_PORT,
        };

        let stage_timeout_secs = get("STAGE_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(STAGE_TIMEOUT_SECS);

        let bedrock_credentials = match (
            first(&["AWS_ACCESS_KEY_ID", "BEDROCK_ACCESS_KEY_ID"]),
            first(&["AWS_SECRET_ACCESS_KEY", "BEDROCK_SECRET_ACCESS_KEY"]),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        // Archival only uses the AWS_* pair; the Bedrock-specific keys do not grant S3 access
        let storage_credentials = match (get("AWS_ACCESS_KEY_ID"), get("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        let backend = match get("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let region = first(&["AWS_REGION", "BEDROCK_REGION"])
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let config = Config {
            server_port,
            environment,
            cors_origins,
            disable_fallbacks: parse_flag(lookup("DISABLE_FALLBACKS")),
            quiet_logs: parse_flag(lookup("QUIET_LOGS")),
            stage_timeout: Duration::from_secs(stage_timeout_secs),
            fallback_rasterize: parse_flag(lookup("FALLBACK_RASTERIZE")),
            max_request_body_bytes: get("MAX_REQUEST_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_REQUEST_BODY_BYTES),
            http_concurrency_limit: get("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            bedrock: BedrockConfig {
                region,
                credentials: bedrock_credentials,
                generate_model_id: get("BEDROCK_GENERATE_MODEL_ID")
                    .unwrap_or_else(|| GENERATE_MODEL_ID.to_string()),
                agent_id: get("BEDROCK_AGENT_ID").unwrap_or_else(|| AGENT_ID.to_string()),
                agent_alias_id: get("BEDROCK_AGENT_ALIAS_ID")
                    .unwrap_or_else(|| AGENT_ALIAS_ID.to_string()),
            },
            storage: StorageConfig {
                backend,
                s3_bucket: get("S3_BUCKET").unwrap_or_else(|| S3_BUCKET.to_string()),
                s3_region: get("S3_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                s3_endpoint: get("S3_ENDPOINT"),
                credentials: storage_credentials,
                local_storage_path: get("LOCAL_STORAGE_PATH"),
                local_storage_base_url: get("LOCAL_STORAGE_BASE_URL"),
            },
            pinata: first(&["PINATA_JWT", "NEXT_PUBLIC_PINATA_JWT"]).map(|jwt| PinataConfig {
                jwt,
                gateway: first(&["PINATA_GATEWAY", "NEXT_PUBLIC_PINATA_GATEWAY"])
                    .unwrap_or_else(|| PINATA_GATEWAY.to_string()),
            }),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.stage_timeout.is_zero() {
            return Err(anyhow::anyhow!("STAGE_TIMEOUT_SECS must be greater than 0"));
        }

        if self.storage.backend == StorageBackend::Local
            && self.storage.local_storage_path.is_some()
            && self.storage.local_storage_base_url.is_none()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}
