//! Archive storage initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use uniicon_core::Config;
use uniicon_storage::{create_storage, Storage};

/// Build the archive backend, or `None` when archival is not configured
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn Storage>>> {
    let storage = create_storage(&config.storage)
        .await
        .context("Failed to initialize archive storage")?;

    if let Some(storage) = &storage {
        tracing::info!(
            backend = %storage.backend_type(),
            bucket = %storage.bucket(),
            "Archive storage initialized"
        );
    }

    Ok(storage)
}
