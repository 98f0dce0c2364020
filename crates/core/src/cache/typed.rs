//! The type-tagged adapter over a byte [`Store`].

use async_trait::async_trait;
use tracing::debug;

use super::serialization::{decode, encode};
use super::traits::ttl_from_seconds;
use super::{Cache, CacheError, Result, Store, TypeTag, Value};

/// How `get` treats JSON and XML payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Decoded values are returned to the caller.
    #[default]
    Decoded,
    /// Payloads are decoded, then the read fails with
    /// [`CacheError::InvalidTag`]. Only raw reads return a value.
    Legacy,
}

/// Cache adapter that encodes values by type tag and delegates storage to `S`.
///
/// Holds no connection of its own. Every operation is a single call into the
/// store, so one instance can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct TypedCache<S> {
    store: S,
    read_mode: ReadMode,
}

impl<S: Store> TypedCache<S> {
    /// Creates an adapter over `store` using [`ReadMode::Decoded`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            read_mode: ReadMode::default(),
        }
    }

    /// Sets how JSON and XML reads behave.
    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: Store> Cache for TypedCache<S> {
    async fn open(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn set(&self, key: &str, tag: TypeTag, value: &Value, ttl_seconds: i64) -> Result<()> {
        // A value that fails to encode never reaches the store.
        let payload = encode(tag, value)?;
        debug!(
            key,
            %tag,
            kind = value.kind(),
            bytes = payload.len(),
            ttl_seconds,
            "cache set"
        );
        self.store
            .set(key, &payload, ttl_from_seconds(ttl_seconds))
            .await
    }

    async fn get(&self, key: &str, tag: TypeTag) -> Result<Value> {
        let payload = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;
        debug!(key, %tag, bytes = payload.len(), "cache get");

        let value = decode(tag, &payload)?;
        match (tag, self.read_mode) {
            (TypeTag::Raw, _) | (_, ReadMode::Decoded) => Ok(value),
            (_, ReadMode::Legacy) => Err(CacheError::InvalidTag(format!(
                "{tag} values are not returned in legacy read mode"
            ))),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!(key, "cache delete");
        self.store.delete(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Store double that keeps payloads in a map and counts calls.
    #[derive(Default)]
    struct RecordingStore {
        entries: Mutex<HashMap<String, Vec<u8>>>,
        last_ttl: Mutex<Option<Option<Duration>>>,
        calls: AtomicUsize,
        unreachable: bool,
    }

    impl RecordingStore {
        fn unreachable() -> Self {
            Self {
                unreachable: true,
                ..Self::default()
            }
        }

        fn raw(&self, key: &str) -> Option<Vec<u8>> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn connect(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                return Err(CacheError::ConnectionFailed("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Store for RecordingStore {
        async fn ping(&self) -> Result<()> {
            self.connect()
        }

        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.connect()?;
            Ok(self.raw(key))
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
            self.connect()?;
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_vec());
            *self.last_ttl.lock().unwrap() = Some(ttl);
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.connect()?;
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn cache() -> TypedCache<RecordingStore> {
        TypedCache::new(RecordingStore::default())
    }

    #[tokio::test]
    async fn test_open_pings_store() {
        let cache = cache();
        cache.open().await.unwrap();
        assert_eq!(cache.store().calls(), 1);
    }

    #[tokio::test]
    async fn test_open_unreachable_store() {
        let cache = TypedCache::new(RecordingStore::unreachable());
        let err = cache.open().await.unwrap_err();
        assert!(matches!(err, CacheError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_json_set_stores_decodable_json() {
        let cache = cache();
        let value = json!({"id": 7, "roles": ["admin", "ops"], "meta": {"beta": true}});

        cache
            .set("user:7", TypeTag::Json, &Value::from(value.clone()), 60)
            .await
            .unwrap();

        let raw = cache.store().raw("user:7").expect("payload stored");
        let decoded: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(decoded, value);
    }

    #[tokio::test]
    async fn test_raw_round_trip() {
        let cache = cache();

        cache
            .set("greeting", TypeTag::Raw, &Value::from("hello"), 0)
            .await
            .unwrap();
        assert_eq!(
            cache.get("greeting", TypeTag::Raw).await,
            Ok(Value::from("hello"))
        );

        let bytes = Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        cache.set("blob", TypeTag::Raw, &bytes, 0).await.unwrap();
        assert_eq!(cache.get("blob", TypeTag::Raw).await, Ok(bytes));
    }

    #[tokio::test]
    async fn test_raw_numbers_read_back_as_text() {
        let cache = cache();
        cache
            .set("counter", TypeTag::Raw, &Value::from(42_i64), 0)
            .await
            .unwrap();
        assert_eq!(
            cache.get("counter", TypeTag::Raw).await,
            Ok(Value::from("42"))
        );
    }

    #[tokio::test]
    async fn test_decoded_mode_returns_json_and_xml_values() {
        let cache = cache();
        let value = Value::from(json!({"a": 1, "b": [true, null]}));

        cache.set("j", TypeTag::Json, &value, 0).await.unwrap();
        assert_eq!(cache.get("j", TypeTag::Json).await, Ok(value.clone()));

        cache.set("x", TypeTag::Xml, &value, 0).await.unwrap();
        assert_eq!(
            cache.get("x", TypeTag::Xml).await,
            Ok(Value::from(json!({"a": "1", "b": ["true", null]})))
        );
    }

    #[tokio::test]
    async fn test_legacy_mode_rejects_json_and_xml_reads() {
        let cache = cache().with_read_mode(ReadMode::Legacy);
        let value = Value::from(json!({"a": 1}));

        cache.set("j", TypeTag::Json, &value, 0).await.unwrap();
        cache.set("x", TypeTag::Xml, &value, 0).await.unwrap();
        cache
            .set("r", TypeTag::Raw, &Value::from("plain"), 0)
            .await
            .unwrap();

        assert!(matches!(
            cache.get("j", TypeTag::Json).await,
            Err(CacheError::InvalidTag(_))
        ));
        assert!(matches!(
            cache.get("x", TypeTag::Xml).await,
            Err(CacheError::InvalidTag(_))
        ));
        assert_eq!(cache.get("r", TypeTag::Raw).await, Ok(Value::from("plain")));
    }

    #[tokio::test]
    async fn test_legacy_mode_still_reports_decode_failures() {
        let cache = cache().with_read_mode(ReadMode::Legacy);
        cache
            .set("bad", TypeTag::Raw, &Value::from("{not json"), 0)
            .await
            .unwrap();

        let err = cache.get("bad", TypeTag::Json).await.unwrap_err();
        assert!(matches!(err, CacheError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = cache();
        let err = cache.get("missing", TypeTag::Raw).await.unwrap_err();
        assert_eq!(err, CacheError::NotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_get_with_mismatched_tag() {
        let cache = cache();
        cache
            .set("x", TypeTag::Xml, &Value::from("text"), 0)
            .await
            .unwrap();

        let err = cache.get("x", TypeTag::Json).await.unwrap_err();
        assert!(matches!(err, CacheError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let cache = cache();
        cache.delete("never-set").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_key() {
        let cache = cache();
        cache
            .set("k", TypeTag::Raw, &Value::from("v"), 0)
            .await
            .unwrap();
        cache.delete("k").await.unwrap();

        assert!(matches!(
            cache.get("k", TypeTag::Raw).await,
            Err(CacheError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_serialization_failure_skips_store() {
        let cache = cache();
        let err = cache
            .set("k", TypeTag::Raw, &Value::from(json!({"a": 1})), 0)
            .await
            .unwrap_err();

        assert!(matches!(err, CacheError::Serialization(_)));
        assert_eq!(cache.store().calls(), 0);
        assert!(cache.store().raw("k").is_none());
    }

    #[tokio::test]
    async fn test_serialization_failure_precedes_connection_failure() {
        let cache = TypedCache::new(RecordingStore::unreachable());
        let err = cache
            .set("k", TypeTag::Raw, &Value::from(json!({"a": 1})), 0)
            .await
            .unwrap_err();

        assert!(matches!(err, CacheError::Serialization(_)));
        assert_eq!(cache.store().calls(), 0);
    }

    #[tokio::test]
    async fn test_ttl_forwarded_to_store() {
        let cache = cache();

        cache
            .set("k", TypeTag::Raw, &Value::from("v"), 30)
            .await
            .unwrap();
        assert_eq!(
            *cache.store().last_ttl.lock().unwrap(),
            Some(Some(Duration::from_secs(30)))
        );

        cache
            .set("k", TypeTag::Raw, &Value::from("v"), -1)
            .await
            .unwrap();
        assert_eq!(*cache.store().last_ttl.lock().unwrap(), Some(None));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let cache = TypedCache::new(RecordingStore::unreachable());

        let err = cache
            .set("k", TypeTag::Raw, &Value::from("v"), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::ConnectionFailed(_)));

        let err = cache.get("k", TypeTag::Raw).await.unwrap_err();
        assert!(matches!(err, CacheError::ConnectionFailed(_)));

        let err = cache.delete("k").await.unwrap_err();
        assert!(matches!(err, CacheError::ConnectionFailed(_)));
    }
}
