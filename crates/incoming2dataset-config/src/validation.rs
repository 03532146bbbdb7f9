// Configuration validation
//
// Required sections must be present and partition roots must be sane
// before any store operation happens.

use crate::{LayoutConfig, RelocatorConfig, StorageBackend, StorageConfig};
use anyhow::{bail, Result};

pub(crate) fn validate_config(config: &RelocatorConfig) -> Result<()> {
    validate_storage_config(&config.storage)?;
    validate_layout_config(&config.layout)?;
    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<()> {
    match config.backend {
        StorageBackend::Fs => {
            let fs = config
                .fs
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("fs storage backend requires 'fs' configuration"))?;

            if fs.root.is_empty() {
                bail!("storage.fs.root must not be empty");
            }
        }
        StorageBackend::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("s3 storage backend requires 's3' configuration"))?;

            if s3.bucket.is_empty() {
                bail!("storage.s3.bucket is required for S3 backend");
            }

            if s3.region.is_empty() {
                bail!("storage.s3.region is required for S3 backend");
            }
        }
    }

    Ok(())
}

fn validate_layout_config(config: &LayoutConfig) -> Result<()> {
    for (field, value) in [
        ("layout.processing_folder", &config.processing_folder),
        ("layout.dataset_folder", &config.dataset_folder),
    ] {
        if value.is_empty() {
            bail!("{} must not be empty", field);
        }
        if value.starts_with('/') || value.ends_with('/') {
            bail!("{} must not start or end with '/': {:?}", field, value);
        }
    }

    // Equal roots would copy every object onto itself and then delete it
    if config.processing_folder == config.dataset_folder {
        bail!(
            "layout.processing_folder and layout.dataset_folder must differ (both are {:?})",
            config.processing_folder
        );
    }

    Ok(())
}
