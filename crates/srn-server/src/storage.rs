//! YAML-backed config store.
//!
//! The file is a flat mapping of the keys in [`ConfigKey`]. Keys this crate
//! does not know about are kept and written back on save.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_yaml::{Mapping, Value};
use srn_core::{ConfigError, ConfigKey, ConfigStore};

/// Contents written when the config file does not exist yet.
pub const DEFAULT_CONFIG: &str = "\
# Range used by `roll` with no arguments.
DefaultMinimum: 1
DefaultMaximum: 6
# Placeholders: -sender -min -max -result. Colour codes start with '&'.
BroadcastMessage: '&e-sender &frolled &a-result &7(-min to -max)'
# Blocks around the roller that see the result. Negative broadcasts to everyone.
BroadcastDistance: -1
";

/// [`ConfigStore`] persisted as a YAML file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    values: Mapping,
}

impl FileConfigStore {
    /// Open `path`, writing [`DEFAULT_CONFIG`] first if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
            }
            fs::write(&path, DEFAULT_CONFIG).map_err(|e| io_error(&path, &e))?;
            tracing::info!(path = %path.display(), "wrote default configuration");
        }

        let values = read_mapping(&path)?;
        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    type Entry = Value;

    fn entry(&self, key: ConfigKey) -> Option<Value> {
        self.values.get(key.as_str()).cloned()
    }

    fn restore(&mut self, key: ConfigKey, entry: Option<Value>) {
        match entry {
            Some(value) => self.values.insert(Value::from(key.as_str()), value),
            None => self.values.remove(key.as_str()),
        };
    }

    fn get_int(&self, key: ConfigKey) -> Option<i64> {
        self.values.get(key.as_str()).and_then(Value::as_i64)
    }

    fn get_string(&self, key: ConfigKey) -> Option<String> {
        self.values.get(key.as_str()).and_then(Value::as_str).map(str::to_owned)
    }

    fn set_int(&mut self, key: ConfigKey, value: i64) {
        self.values.insert(Value::from(key.as_str()), Value::from(value));
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        let contents =
            serde_yaml::to_string(&self.values).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| io_error(&self.path, &e))?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.values = read_mapping(&self.path)?;
        Ok(())
    }
}

fn read_mapping(path: &Path) -> Result<Mapping, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
    if contents.trim().is_empty() {
        return Ok(Mapping::new());
    }
    serde_yaml::from_str(&contents)
        .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
}

fn io_error(path: &Path, err: &io::Error) -> ConfigError {
    ConfigError::Io(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn open_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins/srn/config.yml");

        let store = FileConfigStore::open(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), Some(1));
        assert_eq!(store.get_int(ConfigKey::DefaultMaximum), Some(6));
        assert_eq!(store.get_int(ConfigKey::BroadcastDistance), Some(-1));
        assert_eq!(
            store.get_string(ConfigKey::BroadcastMessage).as_deref(),
            Some(srn_core::config::DEFAULT_BROADCAST_MESSAGE)
        );
    }

    #[test]
    fn save_round_trips_and_keeps_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "DefaultMinimum: 2\nDefaultMaximum: 8\nMotd: hello\n").unwrap();

        let mut store = FileConfigStore::open(&path).unwrap();
        store.set_int(ConfigKey::DefaultMaximum, 20);
        store.save().unwrap();

        let reopened = FileConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get_int(ConfigKey::DefaultMinimum), Some(2));
        assert_eq!(reopened.get_int(ConfigKey::DefaultMaximum), Some(20));
        assert!(fs::read_to_string(&path).unwrap().contains("Motd: hello"));
    }

    #[test]
    fn reload_discards_unsaved_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut store = FileConfigStore::open(&path).unwrap();

        store.set_int(ConfigKey::DefaultMinimum, 4);
        fs::write(&path, "DefaultMinimum: 5\nDefaultMaximum: 2\n").unwrap();
        store.reload().unwrap();

        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), Some(5));
        assert_eq!(store.get_int(ConfigKey::DefaultMaximum), Some(2));
    }

    #[test]
    fn wrong_types_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "DefaultMinimum: three\nBroadcastMessage: 12\n").unwrap();

        let store = FileConfigStore::open(&path).unwrap();
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), None);
        assert_eq!(store.get_string(ConfigKey::BroadcastMessage), None);
    }

    #[test]
    fn restore_keeps_non_integer_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "DefaultMinimum: three\nDefaultMaximum: 6\n").unwrap();

        let mut store = FileConfigStore::open(&path).unwrap();
        let min = store.entry(ConfigKey::DefaultMinimum);
        let distance = store.entry(ConfigKey::BroadcastDistance);
        store.set_int(ConfigKey::DefaultMinimum, 1);
        store.set_int(ConfigKey::BroadcastDistance, 8);
        store.restore(ConfigKey::DefaultMinimum, min);
        store.restore(ConfigKey::BroadcastDistance, distance);

        assert_eq!(store.entry(ConfigKey::DefaultMinimum), Some(Value::from("three")));
        assert_eq!(store.entry(ConfigKey::BroadcastDistance), None);
    }

    #[test]
    fn empty_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "\n").unwrap();

        let store = FileConfigStore::open(&path).unwrap();
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), None);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "DefaultMinimum: [1, 2\n").unwrap();

        let err = FileConfigStore::open(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reload_of_deleted_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut store = FileConfigStore::open(&path).unwrap();

        fs::remove_file(&path).unwrap();
        assert!(matches!(store.reload(), Err(ConfigError::Io(_))));
        assert_eq!(store.get_int(ConfigKey::DefaultMaximum), Some(6));
    }
}
