//! The persistence contract and its in-memory reference backend.
//!
//! The palette store consumes exactly three asynchronous primitives from its
//! storage collaborator: fetch everything in index order, upsert one flat
//! record, and delete one record by primary key. Anything beyond that—real
//! browser storage, retries, quotas—lives on the collaborator's side of the
//! boundary.
//!
//! Records cross the boundary as plain data. The persisted shape strips all
//! type identity:
//!
//! ```json
//! { "id": "d08e35a9117cb453", "sorting": "0|q", "color": { "x": 0.41, "y": 0.21, "z": 0.02 } }
//! ```
//!
//! Reconstruction goes through [`Color::from_xyz`] and never through a
//! notation factory, which would re-clamp already-valid coordinates.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use swatchbook::{Color, Float};

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced by a storage collaborator.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    /// The runtime offers no persistence capability at all. Fatal: the
    /// application cannot proceed without its palette.
    #[error("persistent storage is unavailable: {0}")]
    Unavailable(String),

    /// A named collection does not exist in this store.
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    /// A named index does not exist on the collection.
    #[error("unknown index `{0}` on collection `{1}`")]
    UnknownIndex(String, String),

    /// An individual operation failed mid-flight, e.g., a transaction
    /// abort. Reported, never retried automatically.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

// =============================================================================
// Flat records
// =============================================================================

/// The persisted coordinates of a palette color: a raw XYZ D65 triple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct XyzRecord {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl From<&Color> for XyzRecord {
    fn from(color: &Color) -> Self {
        let [x, y, z] = color.to_xyz();
        Self { x, y, z }
    }
}

impl From<XyzRecord> for Color {
    fn from(record: XyzRecord) -> Self {
        Color::from_xyz(record.x, record.y, record.z)
    }
}

/// One flat palette record, exactly as persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteRecord {
    /// The entry's stable identifier and primary key.
    pub id: String,
    /// The entry's rank key; the storage index orders by this string.
    pub sorting: String,
    /// The entry's color coordinates.
    pub color: XyzRecord,
}

// =============================================================================
// The storage contract
// =============================================================================

/// The narrow, asynchronous contract a palette store requires from its
/// storage collaborator.
///
/// Implementations are expected to keep an index over the `sorting` field of
/// each record; since rank keys are ordered by plain string comparison, the
/// index needs no semantic awareness of rank internals.
#[async_trait]
pub trait PaletteStorage: Send + Sync {
    /// Fetch all records of the collection, ordered by the named index.
    async fn get_all_ordered_by_index(
        &self,
        collection: &str,
        index: &str,
    ) -> Result<Vec<PaletteRecord>, StorageError>;

    /// Insert the record, or overwrite whatever record shares its primary
    /// key.
    async fn put(&self, collection: &str, record: PaletteRecord) -> Result<(), StorageError>;

    /// Delete the record with the given primary key. Deleting an absent key
    /// is not an error.
    async fn delete_by_key(&self, collection: &str, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: PaletteStorage + ?Sized> PaletteStorage for Arc<T> {
    async fn get_all_ordered_by_index(
        &self,
        collection: &str,
        index: &str,
    ) -> Result<Vec<PaletteRecord>, StorageError> {
        (**self).get_all_ordered_by_index(collection, index).await
    }

    async fn put(&self, collection: &str, record: PaletteRecord) -> Result<(), StorageError> {
        (**self).put(collection, record).await
    }

    async fn delete_by_key(&self, collection: &str, key: &str) -> Result<(), StorageError> {
        (**self).delete_by_key(collection, key).await
    }
}

// =============================================================================
// Schema migrations
// =============================================================================

/// The schema version the current code expects.
pub const SCHEMA_VERSION: u32 = 2;

/// One schema migration step, keyed by the version it upgrades *from*.
///
/// Steps apply in sequence from the stored version forward to
/// [`SCHEMA_VERSION`]. Every step must be idempotent, creating only what is
/// missing, so that a partially-upgraded store converges instead of
/// erroring.
struct MigrationStep {
    from_version: u32,
    name: &'static str,
    apply: fn(&mut MemoryInner),
}

const MIGRATIONS: &[MigrationStep] = &[
    MigrationStep {
        from_version: 0,
        name: "create palette collection",
        apply: |inner| {
            inner
                .collections
                .entry("palette".to_string())
                .or_default();
        },
    },
    MigrationStep {
        from_version: 1,
        name: "index palette by sorting",
        apply: |inner| {
            if !inner.indexes.iter().any(|i| i == "sorting") {
                inner.indexes.push("sorting".to_string());
            }
        },
    },
];

// =============================================================================
// In-memory reference backend
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    schema_version: u32,
    collections: HashMap<String, HashMap<String, PaletteRecord>>,
    indexes: Vec<String>,
}

/// An in-memory implementation of the storage contract.
///
/// This backend exists for tests and for running the engine without any
/// browser storage; it honors the same contract a durable backend would,
/// including the version-gated schema setup.
#[derive(Debug)]
pub struct MemoryStore {
    inner: tokio::sync::Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Open a fresh store, applying all schema migrations from version 0.
    pub fn open() -> Self {
        Self::open_at_version(0)
    }

    /// Open a store whose persisted schema claims the given version and
    /// upgrade it. Pending steps apply in order; steps at or past the
    /// stored version are skipped.
    pub fn open_at_version(stored_version: u32) -> Self {
        let mut inner = MemoryInner {
            schema_version: stored_version,
            ..MemoryInner::default()
        };

        for step in MIGRATIONS {
            if step.from_version < inner.schema_version {
                continue;
            }
            debug!(from_version = step.from_version, step = step.name, "applying migration");
            (step.apply)(&mut inner);
            inner.schema_version = step.from_version + 1;
        }

        info!(schema_version = inner.schema_version, "memory store open");
        Self {
            inner: tokio::sync::Mutex::new(inner),
        }
    }

    /// The store's current schema version.
    pub async fn schema_version(&self) -> u32 {
        self.inner.lock().await.schema_version
    }
}

#[async_trait]
impl PaletteStorage for MemoryStore {
    async fn get_all_ordered_by_index(
        &self,
        collection: &str,
        index: &str,
    ) -> Result<Vec<PaletteRecord>, StorageError> {
        let inner = self.inner.lock().await;
        if !inner.indexes.iter().any(|i| i == index) {
            return Err(StorageError::UnknownIndex(
                index.to_string(),
                collection.to_string(),
            ));
        }

        let records = inner
            .collections
            .get(collection)
            .ok_or_else(|| StorageError::UnknownCollection(collection.to_string()))?;

        let mut records: Vec<PaletteRecord> = records.values().cloned().collect();
        records.sort_by(|a, b| a.sorting.cmp(&b.sorting));
        Ok(records)
    }

    async fn put(&self, collection: &str, record: PaletteRecord) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        let records = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StorageError::UnknownCollection(collection.to_string()))?;

        debug!(id = %record.id, sorting = %record.sorting, "put record");
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn delete_by_key(&self, collection: &str, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        let records = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StorageError::UnknownCollection(collection.to_string()))?;

        let removed = records.remove(key);
        debug!(id = %key, removed = removed.is_some(), "delete record");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod test {
    use super::{MemoryStore, PaletteRecord, PaletteStorage, XyzRecord, SCHEMA_VERSION};
    use swatchbook::Color;

    fn record(id: &str, sorting: &str, color: &Color) -> PaletteRecord {
        PaletteRecord {
            id: id.to_string(),
            sorting: sorting.to_string(),
            color: color.into(),
        }
    }

    #[tokio::test]
    async fn test_migrations_reach_current_version() {
        assert_eq!(MemoryStore::open().schema_version().await, SCHEMA_VERSION);

        // Opening at a later stored version only applies the missing steps,
        // and re-running from zero converges on the same schema.
        let partial = MemoryStore::open_at_version(1);
        assert_eq!(partial.schema_version().await, SCHEMA_VERSION);
        assert!(partial
            .get_all_ordered_by_index("palette", "sorting")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::open();
        let red = Color::from_rgb(1.0, 0.0, 0.0);
        let blue = Color::from_rgb(0.0, 0.0, 1.0);

        store.put("palette", record("b", "0|q", &blue)).await.unwrap();
        store.put("palette", record("a", "0|i", &red)).await.unwrap();

        let all = store
            .get_all_ordered_by_index("palette", "sorting")
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            ["a", "b"],
            "records should come back in index order"
        );

        // Upsert by primary key.
        store.put("palette", record("a", "0|y", &red)).await.unwrap();
        let all = store
            .get_all_ordered_by_index("palette", "sorting")
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].sorting, "0|y");

        // Deleting twice is not an error.
        store.delete_by_key("palette", "a").await.unwrap();
        store.delete_by_key("palette", "a").await.unwrap();
        let all = store
            .get_all_ordered_by_index("palette", "sorting")
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_flat_record_shape() {
        // The wire shape strips all type identity.
        let color = Color::from_rgb(1.0, 0.0, 0.0);
        let [x, y, z] = color.to_xyz();
        let flat = record("d08e", "0|i", &color);

        let json = serde_json::to_value(&flat).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "d08e",
                "sorting": "0|i",
                "color": { "x": x, "y": y, "z": z },
            })
        );

        // Deserialization restores the exact coordinates via the raw
        // factory; no clamping may intervene.
        let back: PaletteRecord = serde_json::from_value(json).unwrap();
        let restored: Color = back.color.into();
        assert_eq!(restored.to_xyz(), [x, y, z]);
    }

    #[test]
    fn test_xyz_record_is_to_json_shape() {
        let color = Color::from_rgb(0.25, 0.5, 0.75);
        let record = XyzRecord::from(&color);
        let [x, y, z] = color.to_xyz();
        assert_eq!((record.x, record.y, record.z), (x, y, z));
    }
}
