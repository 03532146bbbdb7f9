// Object-store capability surface consumed by the relocation engine
//
// Implementations:
// - OpendalStore (incoming2dataset-storage): S3 and filesystem backends
// - scripted fakes in engine and handler tests

use async_trait::async_trait;

use crate::error::Result;

/// Minimal object-store interface: one bucket/root, keyed by path strings.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Every key starting with `prefix`, flat, in whatever order the store
    /// returns. Directory placeholders keep their trailing `/`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Server-side copy within the store.
    async fn copy(&self, source_key: &str, dest_key: &str) -> Result<()>;

    /// Remove a single key.
    async fn delete(&self, key: &str) -> Result<()>;
}
