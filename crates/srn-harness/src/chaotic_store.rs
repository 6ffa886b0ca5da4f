//! Config store with injected failures.
//!
//! Wraps [`MemoryConfigStore`] and fails `save` / `reload` with a fixed
//! probability. A failed call leaves the wrapped store exactly as it was.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use srn_core::{ConfigError, ConfigKey, ConfigStore, ConfigValue, MemoryConfigStore};

/// [`ConfigStore`] that randomly refuses to save or reload.
#[derive(Debug, Clone)]
pub struct ChaoticConfigStore {
    inner: MemoryConfigStore,
    rng: ChaCha8Rng,
    failure_rate: f64,
    failures: usize,
}

impl ChaoticConfigStore {
    /// Wrap `inner`, failing each save or reload with probability
    /// `failure_rate` (clamped to `[0, 1]`).
    pub fn new(inner: MemoryConfigStore, failure_rate: f64, seed: u64) -> Self {
        let failure_rate = if failure_rate.is_nan() { 0.0 } else { failure_rate.clamp(0.0, 1.0) };
        Self { inner, rng: ChaCha8Rng::seed_from_u64(seed), failure_rate, failures: 0 }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &MemoryConfigStore {
        &self.inner
    }

    /// Edit the persisted config behind the processor's back.
    pub fn edit_persisted(&mut self, key: ConfigKey, value: ConfigValue) {
        self.inner.edit_persisted(key, value);
    }

    /// Number of injected failures so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    fn inject(&mut self, operation: &str) -> Result<(), ConfigError> {
        if self.rng.gen_bool(self.failure_rate) {
            self.failures += 1;
            return Err(ConfigError::Unavailable(format!("injected {operation} failure")));
        }
        Ok(())
    }
}

impl ConfigStore for ChaoticConfigStore {
    type Entry = ConfigValue;

    fn entry(&self, key: ConfigKey) -> Option<ConfigValue> {
        self.inner.entry(key)
    }

    fn restore(&mut self, key: ConfigKey, entry: Option<ConfigValue>) {
        self.inner.restore(key, entry);
    }

    fn get_int(&self, key: ConfigKey) -> Option<i64> {
        self.inner.get_int(key)
    }

    fn get_string(&self, key: ConfigKey) -> Option<String> {
        self.inner.get_string(key)
    }

    fn set_int(&mut self, key: ConfigKey, value: i64) {
        self.inner.set_int(key, value);
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        self.inject("save")?;
        self.inner.save()
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.inject("reload")?;
        self.inner.reload()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_never_fails() {
        let mut store = ChaoticConfigStore::new(MemoryConfigStore::with_defaults(1, 6), 0.0, 1);
        for _ in 0..100 {
            store.save().unwrap();
            store.reload().unwrap();
        }
        assert_eq!(store.failures(), 0);
    }

    #[test]
    fn full_rate_always_fails_and_changes_nothing() {
        let mut store = ChaoticConfigStore::new(MemoryConfigStore::with_defaults(1, 6), 1.0, 1);

        store.set_int(ConfigKey::DefaultMaximum, 9);
        assert!(matches!(store.save(), Err(ConfigError::Unavailable(_))));
        assert_eq!(store.inner().persisted(ConfigKey::DefaultMaximum), Some(&ConfigValue::Int(6)));

        store.edit_persisted(ConfigKey::DefaultMinimum, ConfigValue::Int(3));
        assert!(store.reload().is_err());
        assert_eq!(store.get_int(ConfigKey::DefaultMinimum), Some(1));
        assert_eq!(store.failures(), 2);
    }

    #[test]
    fn rate_is_clamped() {
        let mut store = ChaoticConfigStore::new(MemoryConfigStore::new(), 7.5, 1);
        assert!(store.save().is_err());

        let mut store = ChaoticConfigStore::new(MemoryConfigStore::new(), f64::NAN, 1);
        assert!(store.save().is_ok());
    }
}
