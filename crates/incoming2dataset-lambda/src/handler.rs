// Event handling for direct Lambda invocations
//
// The trigger sends a bare JSON object: {"asof_date": "YYYY-MM-DD"}.
// Extra fields (Step Functions execution metadata) are ignored.

use incoming2dataset_core::{PartitionDate, RelocateError, Relocator};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

/// Success payload: the input date echoed back, plus what moved.
#[derive(Debug, Serialize)]
pub(crate) struct MoveResponse {
    pub asof_date: String,
    pub objects_moved: usize,
    pub objects_skipped: usize,
}

/// Extract the `asof_date` string from an invocation payload.
///
/// An absent or empty event fails as `EmptyEvent`, an event without a
/// usable string field as `MissingDate`. Neither touches the store.
fn parse_event(event: &Value) -> Result<&str, RelocateError> {
    match event {
        Value::Null => Err(RelocateError::EmptyEvent),
        Value::Object(fields) if fields.is_empty() => Err(RelocateError::EmptyEvent),
        Value::Object(fields) => fields
            .get("asof_date")
            .and_then(Value::as_str)
            .ok_or(RelocateError::MissingDate),
        _ => Err(RelocateError::MissingDate),
    }
}

/// Handle one invocation end to end.
///
/// Every failure is logged with the offending event or date before it
/// propagates; the invocation fails as a whole and retries belong to the
/// caller.
pub(crate) async fn handle_event(
    event: &Value,
    relocator: &Relocator,
) -> Result<MoveResponse, RelocateError> {
    info!(event = %event, "received event");

    let asof_date = parse_event(event).map_err(|err| {
        error!(event = %event, error = %err, "rejecting invocation");
        err
    })?;

    let date = PartitionDate::parse(asof_date).map_err(|err| {
        error!(asof_date, error = %err, "rejecting invocation");
        err
    })?;

    let summary = relocator.relocate(date).await.map_err(|err| {
        error!(asof_date, error = %err, "relocation failed");
        err
    })?;

    Ok(MoveResponse {
        asof_date: asof_date.to_string(),
        objects_moved: summary.objects_moved,
        objects_skipped: summary.objects_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use incoming2dataset_core::{ObjectStore, PartitionLayout, Result, StoreOp};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Store that counts every call, remembers listed prefixes, and can fail
    /// one operation by kind.
    #[derive(Default)]
    struct FakeStore {
        keys: Vec<String>,
        ops: AtomicUsize,
        listed_prefixes: Mutex<Vec<String>>,
        fail_on: Option<StoreOp>,
    }

    impl FakeStore {
        fn with_keys(keys: &[&str]) -> Self {
            Self {
                keys: keys.iter().map(|k| k.to_string()).collect(),
                ..Default::default()
            }
        }

        fn op_count(&self) -> usize {
            self.ops.load(Ordering::SeqCst)
        }

        fn check(&self, op: StoreOp, path: &str) -> Result<()> {
            self.ops.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(op) {
                return Err(RelocateError::store(op, path, "injected failure"));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for FakeStore {
        async fn list(&self, prefix: &str) -> Result<Vec<String>> {
            self.check(StoreOp::List, prefix)?;
            self.listed_prefixes
                .lock()
                .unwrap()
                .push(prefix.to_string());
            Ok(self
                .keys
                .iter()
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn copy(&self, source_key: &str, _dest_key: &str) -> Result<()> {
            self.check(StoreOp::Copy, source_key)
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.check(StoreOp::Delete, key)
        }
    }

    fn relocator(store: Arc<FakeStore>) -> Relocator {
        Relocator::new(
            store,
            PartitionLayout {
                processing_root: "processing".to_string(),
                dataset_root: "dataset".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn empty_events_fail_without_store_calls() {
        let store = Arc::new(FakeStore::default());
        let mover = relocator(store.clone());

        for payload in [json!(null), json!({})] {
            let err = handle_event(&payload, &mover).await.unwrap_err();
            assert!(matches!(err, RelocateError::EmptyEvent), "{payload}");
        }
        assert_eq!(store.op_count(), 0);
    }

    #[tokio::test]
    async fn events_without_a_usable_date_fail_without_store_calls() {
        let store = Arc::new(FakeStore::default());
        let mover = relocator(store.clone());

        let payloads = [
            json!({"execution_id": "abc"}),
            json!({"asof_date": 20230307}),
            json!({"asof_date": null}),
            json!("2023-03-07"),
            json!([{"asof_date": "2023-03-07"}]),
        ];
        for payload in payloads {
            let err = handle_event(&payload, &mover).await.unwrap_err();
            assert!(matches!(err, RelocateError::MissingDate), "{payload}");
        }
        assert_eq!(store.op_count(), 0);
    }

    #[tokio::test]
    async fn malformed_date_fails_without_store_calls() {
        let store = Arc::new(FakeStore::default());
        let mover = relocator(store.clone());

        let err = handle_event(&json!({"asof_date": "2023/03/07"}), &mover)
            .await
            .unwrap_err();
        assert!(matches!(err, RelocateError::InvalidDate { ref value, .. } if value == "2023/03/07"));
        assert_eq!(store.op_count(), 0);
    }

    #[tokio::test]
    async fn success_echoes_the_date_and_ignores_extra_fields() {
        let store = Arc::new(FakeStore::with_keys(&[
            "processing/yyyy=2023/mm=03/dd=07/a.csv",
            "processing/yyyy=2023/mm=03/dd=07/b.csv",
        ]));
        let mover = relocator(store.clone());

        let payload = json!({"asof_date": "2023-03-07", "execution_id": "abc-123"});
        let response = handle_event(&payload, &mover).await.unwrap();

        assert_eq!(response.asof_date, "2023-03-07");
        assert_eq!(response.objects_moved, 2);
        assert_eq!(response.objects_skipped, 0);
    }

    #[tokio::test]
    async fn unpadded_date_is_echoed_verbatim_but_listed_padded() {
        let store = Arc::new(FakeStore::default());
        let mover = relocator(store.clone());

        let response = handle_event(&json!({"asof_date": "2023-3-7"}), &mover)
            .await
            .unwrap();

        assert_eq!(response.asof_date, "2023-3-7");
        assert_eq!(
            *store.listed_prefixes.lock().unwrap(),
            vec!["processing/yyyy=2023/mm=03/dd=07".to_string()]
        );
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let store = Arc::new(FakeStore {
            keys: vec!["processing/yyyy=2023/mm=03/dd=07/a.csv".to_string()],
            fail_on: Some(StoreOp::Copy),
            ..Default::default()
        });
        let mover = relocator(store.clone());

        let err = handle_event(&json!({"asof_date": "2023-03-07"}), &mover)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RelocateError::Store {
                op: StoreOp::Copy,
                ..
            }
        ));
    }

    #[test]
    fn response_serializes_with_the_contract_field_names() {
        let response = MoveResponse {
            asof_date: "2023-03-07".to_string(),
            objects_moved: 3,
            objects_skipped: 1,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"asof_date": "2023-03-07", "objects_moved": 3, "objects_skipped": 1})
        );
    }
}
