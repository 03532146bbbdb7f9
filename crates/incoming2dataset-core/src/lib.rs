// incoming2dataset-core - date-partition relocation engine
//
// This crate owns everything the platform entry points share:
// - partition path handling (yyyy=/mm=/dd= prefixes under a root label)
// - the ObjectStore capability trait {list, copy, delete}
// - the Relocator that walks a dated source prefix and moves each object
// - the error taxonomy
//
// Platform-specific entry points are in separate crates:
// - incoming2dataset-lambda (AWS Lambda, S3)
// - incoming2dataset-cli (manual and backfill runs, S3 or filesystem)

pub mod error;
pub mod partition;
pub mod relocate;
pub mod store;

pub use error::{RelocateError, Result, StoreOp};
pub use partition::{split_object_key, PartitionDate};
pub use relocate::{PartitionLayout, RelocationSummary, Relocator};
pub use store::ObjectStore;
