// incoming2dataset-storage - OpenDAL-backed object store
//
// One ObjectStore implementation across deployments:
// - S3 (Lambda)
// - Filesystem (CLI, local runs, tests)

mod opendal_store;

pub use opendal_store::OpendalStore;
