// Environment-variable configuration.
//
// The deployment contract predates this implementation: the provisioning
// stack injects lowercase names (bucket_name, processing_folder,
// dataset_folder), so lookups use those exact names rather than a crate
// prefix.

use crate::{LayoutConfig, RelocatorConfig, S3Config, StorageBackend, StorageConfig};
use anyhow::{bail, Result};

/// Bucket holding both partition roots.
pub const BUCKET_NAME: &str = "bucket_name";
/// Root the incoming partition lives under.
pub const PROCESSING_FOLDER: &str = "processing_folder";
/// Root the curated partition lives under.
pub const DATASET_FOLDER: &str = "dataset_folder";
/// Standard AWS region variable.
pub const AWS_REGION: &str = "AWS_REGION";
/// Optional S3-compatible endpoint (localstack, minio).
pub const ENDPOINT_URL: &str = "endpoint_url";

const DEFAULT_REGION: &str = "us-east-1";

/// Abstraction over environment lookups so tests can supply a map instead
/// of mutating process state.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process environment.
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Build a configuration from the deployment contract variables alone.
/// Missing or blank required variables fail here, before any date work.
pub(crate) fn from_env<E: EnvSource>(env: &E) -> Result<RelocatorConfig> {
    let bucket = require(env, BUCKET_NAME)?;
    let processing_folder = require(env, PROCESSING_FOLDER)?;
    let dataset_folder = require(env, DATASET_FOLDER)?;
    let region = env
        .get(AWS_REGION)
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    Ok(RelocatorConfig {
        storage: StorageConfig {
            backend: StorageBackend::S3,
            fs: None,
            s3: Some(S3Config {
                bucket,
                region,
                endpoint: env.get(ENDPOINT_URL),
            }),
        },
        layout: LayoutConfig {
            processing_folder,
            dataset_folder,
        },
    })
}

/// Apply environment overrides (highest priority) on top of a file config.
pub(crate) fn apply_env_overrides<E: EnvSource>(config: &mut RelocatorConfig, env: &E) {
    if let Some(bucket) = env.get(BUCKET_NAME) {
        ensure_s3(config).bucket = bucket;
    }
    // AWS_REGION is ambient on most machines; it refines an existing s3
    // section but never creates one.
    if let Some(region) = env.get(AWS_REGION) {
        if let Some(ref mut s3) = config.storage.s3 {
            s3.region = region;
        }
    }
    if let Some(endpoint) = env.get(ENDPOINT_URL) {
        ensure_s3(config).endpoint = Some(endpoint);
    }
    if let Some(folder) = env.get(PROCESSING_FOLDER) {
        config.layout.processing_folder = folder;
    }
    if let Some(folder) = env.get(DATASET_FOLDER) {
        config.layout.dataset_folder = folder;
    }
}

fn ensure_s3(config: &mut RelocatorConfig) -> &mut S3Config {
    config.storage.s3.get_or_insert_with(|| S3Config {
        bucket: String::new(),
        region: DEFAULT_REGION.to_string(),
        endpoint: None,
    })
}

fn require<E: EnvSource>(env: &E, name: &str) -> Result<String> {
    match env.get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => bail!("environment variable {} is set but empty", name),
        None => bail!("required environment variable {} is not set", name),
    }
}
