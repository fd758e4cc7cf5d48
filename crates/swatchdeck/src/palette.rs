//! The palette store.
//!
//! The store owns the in-memory ordered list of palette entries and keeps it
//! synchronized against a storage collaborator. All writes are strict
//! write-through: no in-memory mutation happens until the corresponding
//! persistence call has resolved successfully, so a failed write leaves the
//! palette exactly as it was.
//!
//! The in-memory list is ordered by ascending rank key at all times; array
//! position is a cache of that order, never the source of truth. Moving an
//! entry changes only that entry's key—the whole point of fractional ranks.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use swatchbook::{contrast_ratio, Color, Float};

use crate::config::DeckConfig;
use crate::rank::{RankError, RankGenerator, RankKey};
use crate::storage::{PaletteRecord, PaletteStorage, StorageError};

// =============================================================================
// Errors and states
// =============================================================================

/// The palette store's lifecycle state.
///
/// Commands are only valid in `Ready`; the store enters it through its first
/// successful [`PaletteStore::synchronize`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Synchronizing,
    Ready,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match *self {
            SyncState::Uninitialized => "uninitialized",
            SyncState::Synchronizing => "synchronizing",
            SyncState::Ready => "ready",
        })
    }
}

/// Errors surfaced by palette store commands.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A command arrived before the first synchronization completed.
    /// Commands are rejected, not queued, while the store is not ready.
    #[error("palette store is {0}, not ready for commands")]
    NotReady(SyncState),

    /// A move with an index beyond the current palette length. A caller
    /// bug, not a transient condition.
    #[error("index {index} out of range for palette of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Rank key generation failed.
    #[error(transparent)]
    Rank(#[from] RankError),

    /// The storage collaborator reported a failure. The in-memory palette
    /// is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// =============================================================================
// Palette items
// =============================================================================

/// One palette entry: a stable identifier, a color, and the rank key that
/// orders it.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteItem {
    id: String,
    color: Color,
    sorting: RankKey,
}

impl PaletteItem {
    /// The entry's stable identifier. Identifiers survive moves; array
    /// positions do not.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The entry's color.
    #[inline]
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// The entry's rank key.
    #[inline]
    pub fn sorting(&self) -> &RankKey {
        &self.sorting
    }

    /// Flatten this entry into its persisted shape.
    fn to_record(&self) -> PaletteRecord {
        PaletteRecord {
            id: self.id.clone(),
            sorting: self.sorting.as_str().to_string(),
            color: (&self.color).into(),
        }
    }

    /// Rebuild an entry from its persisted shape. Fails if the rank key is
    /// malformed; the color coordinates are trusted as-is.
    fn from_record(record: PaletteRecord) -> Result<Self, RankError> {
        Ok(Self {
            id: record.id,
            sorting: RankKey::parse(&record.sorting)?,
            color: record.color.into(),
        })
    }
}

/// Derive the content identifier for a color.
///
/// The identifier is the first half of the SHA-256 digest over the color's
/// normalized coordinate bits, hex-encoded. Identical colors therefore
/// collide to the same identifier by design: adding the same color twice
/// addresses the same palette entry.
pub fn content_id(color: &Color) -> String {
    let mut hasher = Sha256::new();
    for bits in color.to_eq_bits() {
        hasher.update(bits.to_be_bytes());
    }

    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

/// Compute the palette's pairwise WCAG contrast matrix.
///
/// Entry `[i][j]` is the contrast ratio between items `i` and `j` in palette
/// order. The matrix is symmetric with a diagonal of 1.
pub fn contrast_matrix(items: &[PaletteItem]) -> Vec<Vec<Float>> {
    let luminances: Vec<Float> = items.iter().map(|item| item.color.luminance()).collect();

    luminances
        .iter()
        .map(|&row| {
            luminances
                .iter()
                .map(|&column| contrast_ratio(row, column))
                .collect()
        })
        .collect()
}

// =============================================================================
// Observers
// =============================================================================

/// A palette observer.
///
/// Observers receive the full, current palette—not a diff—synchronously
/// after every change, in registration order. The store holds strong
/// references; observer lifetime is scoped to the store's own.
pub trait PaletteObserver: Send + Sync {
    /// React to a changed palette. The slice is in ascending rank order.
    fn palette_changed(&self, items: &[PaletteItem]);
}

// =============================================================================
// The store
// =============================================================================

/// The palette store.
///
/// The store is a single logical actor: every mutating command takes
/// `&mut self`, so commands cannot interleave mid-flight and each one reads
/// the current in-memory list, never a stale snapshot. Append keys come
/// from the rank generator's monotonic cursor rather than from list
/// neighbors, so even back-to-back appends can never collide.
///
/// ```ignore
/// let mut store = PaletteStore::new(MemoryStore::open(), DeckConfig::default());
/// store.synchronize().await?;
/// store.add_color("#ff0000".parse()?).await?;
/// ```
pub struct PaletteStore<S> {
    storage: S,
    config: DeckConfig,
    ranker: RankGenerator,
    items: Vec<PaletteItem>,
    observers: Vec<Arc<dyn PaletteObserver>>,
    state: SyncState,
}

impl<S: PaletteStorage> PaletteStore<S> {
    /// Create a new, uninitialized store over the given storage
    /// collaborator. The store accepts commands only after
    /// [`PaletteStore::synchronize`] has completed once.
    pub fn new(storage: S, config: DeckConfig) -> Self {
        let ranker = RankGenerator::new(config.rank_seed);
        Self {
            storage,
            config,
            ranker,
            items: Vec::new(),
            observers: Vec::new(),
            state: SyncState::Uninitialized,
        }
    }

    /// The store's lifecycle state.
    #[inline]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The current palette, in ascending rank order.
    #[inline]
    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    /// The number of palette entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Determine whether the palette is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        if self.state == SyncState::Ready {
            Ok(())
        } else {
            Err(StoreError::NotReady(self.state))
        }
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Register an observer. Registering the same observer twice is a
    /// warn-logged no-op.
    pub fn add_observer(&mut self, observer: Arc<dyn PaletteObserver>) {
        if self
            .observers
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &observer))
        {
            warn!("observer is already registered");
            return;
        }
        self.observers.push(observer);
    }

    /// Deregister an observer. Removing an observer that was never
    /// registered is a warn-logged no-op.
    pub fn remove_observer(&mut self, observer: &Arc<dyn PaletteObserver>) {
        match self
            .observers
            .iter()
            .position(|existing| Arc::ptr_eq(existing, observer))
        {
            Some(index) => {
                self.observers.remove(index);
            }
            None => warn!("observer was never registered"),
        }
    }

    fn notify_observers(&self) {
        for observer in &self.observers {
            observer.palette_changed(&self.items);
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Rebuild the palette from storage.
    ///
    /// This is the expensive, infrequent path: it discards the in-memory
    /// list, refetches every record in index order, advances the rank
    /// cursor past the largest persisted key, and notifies observers.
    /// Records with a malformed rank key are logged and skipped; one
    /// corrupt row does not take the palette down.
    pub async fn synchronize(&mut self) -> Result<(), StoreError> {
        self.state = SyncState::Synchronizing;

        let records = match self
            .storage
            .get_all_ordered_by_index(&self.config.collection, &self.config.index)
            .await
        {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "palette fetch failed");
                self.state = SyncState::Uninitialized;
                return Err(error.into());
            }
        };

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            match PaletteItem::from_record(record) {
                Ok(item) => {
                    self.ranker.observe(&item.sorting);
                    items.push(item);
                }
                Err(error) => warn!(%error, "skipping malformed palette record"),
            }
        }

        // Ascending rank order is the source of truth, whatever order the
        // records arrived in.
        items.sort_by(|a, b| a.sorting.cmp(&b.sorting));

        self.items = items;
        self.state = SyncState::Ready;
        info!(items = self.items.len(), "palette synchronized");
        self.notify_observers();
        Ok(())
    }

    /// Append a color to the palette.
    ///
    /// The entry's identifier derives from the color's content, so adding a
    /// color that is already present re-addresses the existing entry: the
    /// persisted record is overwritten and the entry moves to the
    /// most-recently-added position. The returned identifier is what
    /// [`PaletteStore::remove_by_id`] takes.
    pub async fn add_color(&mut self, color: Color) -> Result<String, StoreError> {
        let id = content_id(&color);
        self.add_color_with_id(id, color).await
    }

    /// Append a color under a caller-supplied identifier.
    pub async fn add_color_with_id(
        &mut self,
        id: String,
        color: Color,
    ) -> Result<String, StoreError> {
        self.ensure_ready()?;

        let item = PaletteItem {
            id: id.clone(),
            color,
            sorting: self.ranker.next_append(),
        };

        if let Err(error) = self
            .storage
            .put(&self.config.collection, item.to_record())
            .await
        {
            warn!(id = %item.id, %error, "palette write failed");
            return Err(error.into());
        }

        if let Some(index) = self.items.iter().position(|existing| existing.id == item.id) {
            debug!(id = %item.id, "re-added color moves to the end");
            self.items.remove(index);
        }
        debug!(id = %item.id, sorting = %item.sorting, "color added");
        self.items.push(item);
        self.notify_observers();
        Ok(id)
    }

    /// Remove the entry with the given identifier.
    ///
    /// Returns whether an entry was actually removed. An identifier that is
    /// already gone is treated as already-removed: the deletion persists
    /// fine, nothing changes in memory, and observers are not notified.
    pub async fn remove_by_id(&mut self, id: &str) -> Result<bool, StoreError> {
        self.ensure_ready()?;

        if let Err(error) = self
            .storage
            .delete_by_key(&self.config.collection, id)
            .await
        {
            warn!(id, %error, "palette deletion failed");
            return Err(error.into());
        }

        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                debug!(id, "color removed");
                self.notify_observers();
                Ok(true)
            }
            None => {
                debug!(id, "color was already removed");
                Ok(false)
            }
        }
    }

    /// Move the entry at `old_index` to `new_index`.
    ///
    /// Only the moved entry's rank key changes: it is recomputed between
    /// the keys of its new neighbors and persisted as a single record
    /// write. Every other entry's persisted state is untouched. Indexes
    /// beyond the current length are an error; moving an entry onto itself
    /// is a no-op.
    pub async fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<(), StoreError> {
        self.ensure_ready()?;

        let len = self.items.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }
        if old_index == new_index {
            return Ok(());
        }

        // The neighbors after the splice, read off the unmutated list: drop
        // the moved entry, then look around the insertion slot.
        let sorting = {
            let rest = || {
                self.items
                    .iter()
                    .enumerate()
                    .filter(move |(index, _)| *index != old_index)
                    .map(|(_, item)| item)
            };
            let below = new_index.checked_sub(1).and_then(|index| rest().nth(index));
            let above = rest().nth(new_index);
            self.ranker
                .between(below.map(PaletteItem::sorting), above.map(PaletteItem::sorting))?
        };

        let mut record = self.items[old_index].to_record();
        record.sorting = sorting.as_str().to_string();
        if let Err(error) = self.storage.put(&self.config.collection, record).await {
            warn!(from = old_index, to = new_index, %error, "palette write failed");
            return Err(error.into());
        }

        // A move to the end can exceed the append cursor.
        self.ranker.observe(&sorting);

        let mut item = self.items.remove(old_index);
        item.sorting = sorting;
        debug!(id = %item.id, from = old_index, to = new_index, sorting = %item.sorting, "item moved");
        self.items.insert(new_index, item);
        self.notify_observers();
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
