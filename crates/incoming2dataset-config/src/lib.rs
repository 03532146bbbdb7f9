// incoming2dataset-config - Configuration for the partition relocator
//
// Sources, in priority order:
// 1. Environment variables (deployment contract: bucket_name,
//    processing_folder, dataset_folder, plus AWS_REGION / endpoint_url)
// 2. Config file path from INCOMING2DATASET_CONFIG or a --config flag
//
// Lambda deployments run on environment variables alone; the TOML file
// exists for CLI and local runs.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod env;
mod sources;
mod validation;

pub use env::{EnvSource, StdEnv};
pub use sources::CONFIG_PATH_VAR;

/// Main relocator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocatorConfig {
    pub storage: StorageConfig,
    pub layout: LayoutConfig,
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Config>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Fs,
    S3,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Fs => write!(f, "fs"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fs" | "filesystem" => Ok(StorageBackend::Fs),
            "s3" | "aws" => Ok(StorageBackend::S3),
            _ => anyhow::bail!("Unsupported storage backend: {}. Supported: fs, s3", s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsConfig {
    pub root: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Partition roots within the store. Both name top-level folders, no
/// leading or trailing separator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub processing_folder: String,
    pub dataset_folder: String,
}

impl RelocatorConfig {
    /// Build from the deployment environment alone (Lambda startup path).
    pub fn from_env<E: EnvSource>(env: &E) -> Result<Self> {
        let config = env::from_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific TOML file, then apply environment overrides
    /// (useful for the CLI --config flag).
    pub fn load_from_path<E: EnvSource>(path: impl AsRef<Path>, env: &E) -> Result<Self> {
        sources::load_from_file_path(path, env)
    }

    /// Load from the file named by INCOMING2DATASET_CONFIG when set,
    /// otherwise from the deployment environment.
    pub fn load() -> Result<Self> {
        sources::load_config(&StdEnv)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_from_str() {
        assert_eq!("fs".parse::<StorageBackend>().unwrap(), StorageBackend::Fs);
        assert_eq!("s3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            "filesystem".parse::<StorageBackend>().unwrap(),
            StorageBackend::Fs
        );
        assert_eq!("aws".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert!("r2".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn parses_full_toml_document() {
        let toml = r#"
            [storage]
            backend = "s3"

            [storage.s3]
            bucket = "ingest-bucket"
            region = "eu-west-1"

            [layout]
            processing_folder = "processing"
            dataset_folder = "dataset"
        "#;
        let config: RelocatorConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert!(config.storage.fs.is_none());
        assert_eq!(config.layout.processing_folder, "processing");
        assert_eq!(config.layout.dataset_folder, "dataset");
        let s3 = config.storage.s3.unwrap();
        assert_eq!(s3.bucket, "ingest-bucket");
        assert_eq!(s3.region, "eu-west-1");
        assert_eq!(s3.endpoint, None);
    }

    #[test]
    fn fs_backend_document_validates() {
        let toml = r#"
            [storage]
            backend = "fs"

            [storage.fs]
            root = "./data"

            [layout]
            processing_folder = "incoming"
            dataset_folder = "curated"
        "#;
        let config: RelocatorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Fs);
        config.validate().unwrap();
    }
}
