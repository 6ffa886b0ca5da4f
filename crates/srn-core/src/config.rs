//! Durable configuration the processor reads and writes.
//!
//! The processor never touches files itself. It talks to a [`ConfigStore`],
//! which the host backs with whatever persistence it has. [`MemoryConfigStore`]
//! is the in-process implementation used by tests and embedders that keep
//! configuration elsewhere.

use std::{collections::HashMap, fmt};

use thiserror::Error;

/// Template used when `BroadcastMessage` is absent.
pub const DEFAULT_BROADCAST_MESSAGE: &str = "&e-sender &frolled &a-result &7(-min to -max)";

/// Keys the processor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Default lower bound (int).
    DefaultMinimum,
    /// Default upper bound (int).
    DefaultMaximum,
    /// Broadcast template (string).
    BroadcastMessage,
    /// Broadcast radius in blocks (int, negative or absent means global).
    BroadcastDistance,
}

impl ConfigKey {
    /// Every key, in file order.
    pub const ALL: [Self; 4] =
        [Self::DefaultMinimum, Self::DefaultMaximum, Self::BroadcastMessage, Self::BroadcastDistance];

    /// Name of the key as it appears in the host's config file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DefaultMinimum => "DefaultMinimum",
            Self::DefaultMaximum => "DefaultMaximum",
            Self::BroadcastMessage => "BroadcastMessage",
            Self::BroadcastDistance => "BroadcastDistance",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// Integer value.
    Int(i64),
    /// Text value.
    Text(String),
}

/// Errors from config store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Reading or writing the backing medium failed.
    #[error("I/O failure: {0}")]
    Io(String),

    /// The backing medium holds something that is not valid configuration.
    #[error("malformed configuration: {0}")]
    Parse(String),

    /// The store cannot be reached right now.
    #[error("configuration store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key/value configuration owned by the host.
///
/// `set_int` only changes the loaded values; `save` makes them durable and
/// `reload` replaces the loaded values with the durable ones.
pub trait ConfigStore {
    /// Raw stored value of a key, of whatever type the medium holds.
    type Entry;

    /// Loaded value of `key` as stored, `None` if absent.
    fn entry(&self, key: ConfigKey) -> Option<Self::Entry>;

    /// Put back a value previously returned by [`ConfigStore::entry`].
    /// `None` removes the key.
    fn restore(&mut self, key: ConfigKey, entry: Option<Self::Entry>);

    /// Integer value of `key`, or `None` if absent or not an integer.
    fn get_int(&self, key: ConfigKey) -> Option<i64>;

    /// String value of `key`, or `None` if absent or not a string.
    fn get_string(&self, key: ConfigKey) -> Option<String>;

    /// Set `key` to an integer in the loaded configuration.
    fn set_int(&mut self, key: ConfigKey, value: i64);

    /// Persist the loaded configuration.
    fn save(&mut self) -> Result<(), ConfigError>;

    /// Discard the loaded configuration and read the persisted one.
    fn reload(&mut self) -> Result<(), ConfigError>;
}

/// In-memory [`ConfigStore`] with separate loaded and persisted maps.
///
/// [`MemoryConfigStore::edit_persisted`] stands in for someone editing the
/// file by hand while the server runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfigStore {
    loaded: HashMap<ConfigKey, ConfigValue>,
    persisted: HashMap<ConfigKey, ConfigValue>,
    saves: usize,
}

impl MemoryConfigStore {
    /// Empty store: every key absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given defaults, both loaded and persisted.
    pub fn with_defaults(min: i64, max: i64) -> Self {
        let mut store = Self::new();
        store.edit_persisted(ConfigKey::DefaultMinimum, ConfigValue::Int(min));
        store.edit_persisted(ConfigKey::DefaultMaximum, ConfigValue::Int(max));
        store.loaded = store.persisted.clone();
        store
    }

    /// Builder-style loaded + persisted value.
    #[must_use]
    pub fn with_value(mut self, key: ConfigKey, value: ConfigValue) -> Self {
        self.loaded.insert(key, value.clone());
        self.persisted.insert(key, value);
        self
    }

    /// Change the persisted value without touching the loaded one.
    pub fn edit_persisted(&mut self, key: ConfigKey, value: ConfigValue) {
        self.persisted.insert(key, value);
    }

    /// Persisted value of `key`.
    pub fn persisted(&self, key: ConfigKey) -> Option<&ConfigValue> {
        self.persisted.get(&key)
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for MemoryConfigStore {
    type Entry = ConfigValue;

    fn entry(&self, key: ConfigKey) -> Option<ConfigValue> {
        self.loaded.get(&key).cloned()
    }

    fn restore(&mut self, key: ConfigKey, entry: Option<ConfigValue>) {
        match entry {
            Some(value) => self.loaded.insert(key, value),
            None => self.loaded.remove(&key),
        };
    }

    fn get_int(&self, key: ConfigKey) -> Option<i64> {
        match self.loaded.get(&key) {
            Some(ConfigValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    fn get_string(&self, key: ConfigKey) -> Option<String> {
        match self.loaded.get(&key) {
            Some(ConfigValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn set_int(&mut self, key: ConfigKey, value: i64) {
        self.loaded.insert(key, ConfigValue::Int(value));
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        self.persisted = self.loaded.clone();
        self.saves += 1;
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.loaded = self.persisted.clone();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_read_as_none() {
        let store = MemoryConfigStore::new();
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), None);
        assert_eq!(store.get_string(ConfigKey::BroadcastMessage), None);
    }

    #[test]
    fn wrong_type_reads_as_none() {
        let store = MemoryConfigStore::new()
            .with_value(ConfigKey::DefaultMinimum, ConfigValue::Text("three".into()));
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), None);
    }

    #[test]
    fn set_is_not_durable_until_saved() {
        let mut store = MemoryConfigStore::with_defaults(1, 6);
        store.set_int(ConfigKey::DefaultMinimum, 3);
        assert_eq!(store.persisted(ConfigKey::DefaultMinimum), Some(&ConfigValue::Int(1)));

        store.save().unwrap();
        assert_eq!(store.persisted(ConfigKey::DefaultMinimum), Some(&ConfigValue::Int(3)));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn reload_discards_unsaved_changes() {
        let mut store = MemoryConfigStore::with_defaults(1, 6);
        store.set_int(ConfigKey::DefaultMaximum, 20);
        store.reload().unwrap();
        assert_eq!(store.get_int(ConfigKey::DefaultMaximum), Some(6));
    }

    #[test]
    fn reload_picks_up_hand_edits() {
        let mut store = MemoryConfigStore::with_defaults(1, 6);
        store.edit_persisted(ConfigKey::DefaultMinimum, ConfigValue::Int(5));
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), Some(1));

        store.reload().unwrap();
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), Some(5));
    }

    #[test]
    fn restore_puts_back_raw_entries() {
        let mut store = MemoryConfigStore::new()
            .with_value(ConfigKey::DefaultMinimum, ConfigValue::Text("three".into()));
        let min = store.entry(ConfigKey::DefaultMinimum);
        let max = store.entry(ConfigKey::DefaultMaximum);

        store.set_int(ConfigKey::DefaultMinimum, 1);
        store.set_int(ConfigKey::DefaultMaximum, 6);
        store.restore(ConfigKey::DefaultMinimum, min);
        store.restore(ConfigKey::DefaultMaximum, max);

        assert_eq!(store.entry(ConfigKey::DefaultMinimum), Some(ConfigValue::Text("three".into())));
        assert_eq!(store.entry(ConfigKey::DefaultMaximum), None);
    }

    #[test]
    fn key_names_match_config_file() {
        let names: Vec<_> = ConfigKey::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec!["DefaultMinimum", "DefaultMaximum", "BroadcastMessage", "BroadcastDistance"]
        );
    }
}
