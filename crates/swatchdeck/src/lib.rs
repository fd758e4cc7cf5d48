//! # Swatchdeck
//!
//! Swatchdeck keeps an ordered palette of [`swatchbook::Color`]s alive
//! across sessions. It is the stateful half of the palette editor's engine:
//! where `swatchbook` computes, `swatchdeck` remembers.
//!
//! The main abstractions are:
//!
//!   * [`RankKey`] and [`RankGenerator`] implement **fractional rank keys**
//!     in the LexoRank tradition: opaque strings whose plain lexicographic
//!     order is the palette order, with a key between any two distinct keys
//!     always available. Reordering an entry rewrites that entry alone,
//!     never the rest of the palette.
//!   * [`PaletteStore`] owns the **in-memory ordered palette** and drives
//!     the add/remove/move/synchronize lifecycle with strict write-through
//!     persistence. [`PaletteObserver`]s receive the full list after every
//!     change.
//!   * [`PaletteStorage`] is the **narrow asynchronous contract** a storage
//!     collaborator fulfills: fetch-all in index order, upsert, delete by
//!     key. [`MemoryStore`] is the in-memory reference implementation,
//!     including the version-gated schema setup a durable backend would
//!     run.
//!   * [`DeckConfig`] carries the handful of knobs—collection name, index
//!     name, rank seed—by constructor injection.

pub mod config;
pub mod palette;
pub mod rank;
pub mod storage;

pub use config::{ConfigError, DeckConfig};
pub use palette::{
    content_id, contrast_matrix, PaletteItem, PaletteObserver, PaletteStore, StoreError, SyncState,
};
pub use rank::{RankError, RankGenerator, RankKey};
pub use storage::{
    MemoryStore, PaletteRecord, PaletteStorage, StorageError, XyzRecord, SCHEMA_VERSION,
};
