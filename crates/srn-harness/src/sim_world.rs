//! The real processor behind the model's interface.

use srn_core::{CommandProcessor, ConfigKey, ConfigStore, ConfigValue, MemoryConfigStore, Roll};

use crate::{
    chaotic_store::ChaoticConfigStore,
    model::{ObservableState, Operation, OperationResult, StoredPair, StoredValue},
    sim_env::SimEnv,
};

/// Real system wrapper that mirrors [`ModelWorld`](crate::ModelWorld)'s
/// interface.
#[derive(Debug)]
pub struct SimWorld {
    processor: CommandProcessor<SimEnv, ChaoticConfigStore>,
    last_roll: Option<Roll>,
}

impl SimWorld {
    /// World whose store starts with `min` and `max` and never fails.
    pub fn new(min: StoredValue, max: StoredValue, seed: u64) -> Self {
        Self::with_failure_rate(min, max, seed, 0.0)
    }

    /// World whose store fails saves and reloads with `failure_rate`.
    pub fn with_failure_rate(
        min: StoredValue,
        max: StoredValue,
        seed: u64,
        failure_rate: f64,
    ) -> Self {
        let store = MemoryConfigStore::new()
            .with_value(ConfigKey::DefaultMinimum, min.to_config())
            .with_value(ConfigKey::DefaultMaximum, max.to_config());
        let store = ChaoticConfigStore::new(store, failure_rate, seed.wrapping_add(1));

        Self {
            processor: CommandProcessor::new(SimEnv::with_seed(seed), store),
            last_roll: None,
        }
    }

    /// The processor under test.
    pub fn processor(&self) -> &CommandProcessor<SimEnv, ChaoticConfigStore> {
        &self.processor
    }

    /// Roll drawn by the most recent operation, if it rolled.
    pub fn last_roll(&self) -> Option<Roll> {
        self.last_roll
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        self.last_roll = None;

        match op {
            Operation::Invoke { actor, .. } => {
                let outcome = self.processor.handle(actor, &op.rendered_args());
                let replies: Vec<String> = outcome.replies().map(str::to_owned).collect();

                if !outcome.handled {
                    return OperationResult::Rejected(replies.concat());
                }

                self.last_roll = outcome.roll();
                match outcome.roll() {
                    Some(roll) => OperationResult::Rolled { min: roll.min, max: roll.max },
                    None => OperationResult::Replied(replies),
                }
            },
            Operation::EditStoredConfig { field, value } => {
                self.processor.config_mut().edit_persisted(field.bound().key(), value.to_config());
                OperationResult::Edited
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let defaults = self.processor.default_range();
        let config = self.processor.config();

        let persisted = |key| match config.inner().persisted(key) {
            Some(ConfigValue::Int(value)) => Some(*value),
            _ => None,
        };

        ObservableState {
            defaults: (defaults.min(), defaults.max()),
            loaded: StoredPair {
                min: config.get_int(ConfigKey::DefaultMinimum),
                max: config.get_int(ConfigKey::DefaultMaximum),
            },
            persisted: StoredPair {
                min: persisted(ConfigKey::DefaultMinimum),
                max: persisted(ConfigKey::DefaultMaximum),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Actor, Token};

    #[test]
    fn default_roll_stays_in_range() {
        let mut world = SimWorld::new(StoredValue::Int(2), StoredValue::Int(4), 11);

        for _ in 0..50 {
            let result = world.apply(&Operation::Invoke { actor: Actor::Player, args: vec![] });
            assert_eq!(result, OperationResult::Rolled { min: 2, max: 4 });
            let roll = world.last_roll().map(|r| r.result);
            assert!(roll.is_some_and(|r| (2..=4).contains(&r)));
        }
    }

    #[test]
    fn rejection_clears_last_roll() {
        let mut world = SimWorld::new(StoredValue::Int(1), StoredValue::Int(6), 11);

        world.apply(&Operation::Invoke { actor: Actor::Player, args: vec![] });
        let result =
            world.apply(&Operation::Invoke { actor: Actor::Guest, args: vec![Token::Int(3)] });

        assert!(result.is_err());
        assert_eq!(world.last_roll(), None);
    }
}
