//! Deck configuration.
//!
//! The configuration travels by constructor injection: whoever assembles the
//! application hands a [`DeckConfig`] (and a storage handle) to the palette
//! store. There is no ambient global state.

use serde::{Deserialize, Serialize};

/// Palette store configuration.
///
/// ```toml
/// collection = "palette"
/// index = "sorting"
/// rank_seed = 0
/// ```
///
/// Every field has a default, so an empty document is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// The storage collection palette records live in.
    pub collection: String,
    /// The ordered index over the records' `sorting` field.
    pub index: String,
    /// The seed for the rank generator; selects the key bucket prefix and
    /// nothing else.
    pub rank_seed: u64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            collection: "palette".to_string(),
            index: "sorting".to_string(),
            rank_seed: 0,
        }
    }
}

/// A malformed configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed deck configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl DeckConfig {
    /// Parse a configuration from its TOML representation.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }
}
