// OpenDAL-based object store implementation

use async_trait::async_trait;
use incoming2dataset_core::{ObjectStore, RelocateError, Result, StoreOp};
use opendal::Operator;

/// Object store over an OpenDAL operator. Cloning is cheap; the operator is
/// reference-counted internally.
#[derive(Clone)]
pub struct OpendalStore {
    operator: Operator,
}

impl OpendalStore {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Create storage for S3. Credentials come from the environment or the
    /// execution role via OpenDAL's default loader.
    #[cfg(feature = "services-s3")]
    pub fn new_s3(bucket: &str, region: &str, endpoint: Option<&str>) -> anyhow::Result<Self> {
        use opendal::services;

        let mut builder = services::S3::default().bucket(bucket).region(region);

        if let Some(ep) = endpoint {
            builder = builder.endpoint(ep);
        }

        let operator = Operator::new(builder)?.finish();
        Ok(Self { operator })
    }

    /// Create storage for the local filesystem.
    #[cfg(feature = "services-fs")]
    pub fn new_fs(root: &str) -> anyhow::Result<Self> {
        use opendal::services;

        let builder = services::Fs::default().root(root);

        let operator = Operator::new(builder)?.finish();
        Ok(Self { operator })
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }
}

#[async_trait]
impl ObjectStore for OpendalStore {
    /// Flat prefix listing, matching S3 ListObjectsV2 semantics. Directory
    /// entries keep their trailing '/'.
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let entries = self
            .operator
            .list_with(prefix)
            .recursive(true)
            .await
            .map_err(|e| RelocateError::store(StoreOp::List, prefix, e))?;

        Ok(entries
            .into_iter()
            .map(|entry| entry.path().to_string())
            .collect())
    }

    async fn copy(&self, source_key: &str, dest_key: &str) -> Result<()> {
        self.operator
            .copy(source_key, dest_key)
            .await
            .map_err(|e| RelocateError::store(StoreOp::Copy, source_key, e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.operator
            .delete(key)
            .await
            .map_err(|e| RelocateError::store(StoreOp::Delete, key, e))
    }
}
