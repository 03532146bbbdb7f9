// AWS Lambda runtime adapter
//
// Invoked directly (Step Functions task or manual invoke) with a bare JSON
// object carrying asof_date; responds with the echoed date and move counts.
//
// Philosophy: Use lambda_runtime's provided tokio
// We don't add our own tokio - lambda_runtime provides it

use incoming2dataset_config::{RelocatorConfig, StdEnv};
use incoming2dataset_core::{PartitionLayout, Relocator};
use incoming2dataset_storage::OpendalStore;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

mod handler;

use handler::{handle_event, MoveResponse};

async fn handle_request(
    event: LambdaEvent<serde_json::Value>,
    relocator: Arc<Relocator>,
) -> Result<MoveResponse, Error> {
    let (payload, _context) = event.into_parts();
    handle_event(&payload, &relocator).await.map_err(Error::from)
}

/// Lambda runtime entry point
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // Deployment contract variables (bucket_name, processing_folder,
    // dataset_folder) are resolved here, before any event is polled. A
    // missing variable fails the whole execution environment.
    let config = RelocatorConfig::from_env(&StdEnv)
        .map_err(|e| Error::from(format!("Failed to load configuration: {}", e)))?;

    let RelocatorConfig { storage, layout } = config;
    let s3 = storage
        .s3
        .ok_or_else(|| Error::from("s3 storage configuration missing"))?;

    // OpenDAL discovers AWS credentials from the execution role or the
    // environment; only bucket, region and an optional endpoint are ours.
    let store = OpendalStore::new_s3(&s3.bucket, &s3.region, s3.endpoint.as_deref())
        .map_err(|e| Error::from(format!("Failed to initialize storage: {}", e)))?;

    let relocator = Arc::new(Relocator::new(
        Arc::new(store),
        PartitionLayout {
            processing_root: layout.processing_folder,
            dataset_root: layout.dataset_folder,
        },
    ));

    info!(
        bucket = %s3.bucket,
        region = %s3.region,
        "partition relocator ready"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let relocator = relocator.clone();
        async move { handle_request(event, relocator).await }
    }))
    .await
}

/// Initialize tracing for CloudWatch: RUST_LOG filtering, no ANSI colors.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false))
        .init();
}
