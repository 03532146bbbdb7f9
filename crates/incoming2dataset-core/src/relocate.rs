// Date-partition relocation
//
// Lists the dated source prefix, copies each real object to the dated
// destination prefix, then deletes the original. Copy strictly precedes
// delete per object, so a failure can leave a momentary duplicate but
// never a vanished object.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::partition::{split_object_key, PartitionDate};
use crate::store::ObjectStore;

/// Root labels the two dated partitions live under.
#[derive(Debug, Clone)]
pub struct PartitionLayout {
    pub processing_root: String,
    pub dataset_root: String,
}

/// Outcome of one relocation run.
#[derive(Debug, Clone, Serialize)]
pub struct RelocationSummary {
    pub source_prefix: String,
    pub dest_prefix: String,
    pub objects_moved: usize,
    pub objects_skipped: usize,
}

/// Moves a date partition between two roots of one object store.
pub struct Relocator {
    store: Arc<dyn ObjectStore>,
    layout: PartitionLayout,
}

impl Relocator {
    pub fn new(store: Arc<dyn ObjectStore>, layout: PartitionLayout) -> Self {
        Self { store, layout }
    }

    /// Relocate every object under the dated processing prefix to the dated
    /// dataset prefix.
    ///
    /// Entries are processed one at a time in listing order. A store failure
    /// aborts the run: objects already moved stay moved, the remainder stays
    /// at the source. Re-running the same date is safe; moved objects no
    /// longer appear in the source listing. Concurrent runs against the same
    /// partition are not serialized here; callers must not overlap them.
    pub async fn relocate(&self, date: PartitionDate) -> Result<RelocationSummary> {
        let source_prefix = date.prefix_under(&self.layout.processing_root);
        let dest_prefix = date.prefix_under(&self.layout.dataset_root);

        let keys = self.store.list(&source_prefix).await?;
        debug!(prefix = %source_prefix, entries = keys.len(), "listed source partition");

        let mut objects_moved = 0usize;
        let mut objects_skipped = 0usize;

        for key in keys {
            let (_, file_name) = split_object_key(&key);
            if file_name.is_empty() {
                // Directory placeholder, not a file
                debug!(key = %key, "skipping placeholder entry");
                objects_skipped += 1;
                continue;
            }

            // Nested keys flatten to their final segment under the
            // destination prefix.
            let dest_key = format!("{}/{}", dest_prefix, file_name);
            self.store.copy(&key, &dest_key).await?;
            self.store.delete(&key).await?;
            objects_moved += 1;
        }

        info!(
            source = %source_prefix,
            dest = %dest_prefix,
            moved = objects_moved,
            skipped = objects_skipped,
            "partition relocation complete"
        );

        Ok(RelocationSummary {
            source_prefix,
            dest_prefix,
            objects_moved,
            objects_skipped,
        })
    }
}
