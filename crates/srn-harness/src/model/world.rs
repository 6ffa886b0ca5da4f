//! Model world - the reference implementation of the command surface.
//!
//! Tracks the defaults in effect and both copies of the two stored values
//! (loaded and persisted) as plain integers. Error texts come from
//! [`CommandError`] so the oracle compares wording too.

use srn_core::{Bound, CommandError, Permission, RangeViolation};

use super::operation::{Actor, Field, Operation, OperationResult, StoredValue, Token};

/// Fallback used when the stored defaults are unusable.
const FALLBACK: (i32, i32) = (1, 6);

/// Stored `DefaultMinimum` / `DefaultMaximum` as a store reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredPair {
    /// `DefaultMinimum`, `None` when absent or not an integer.
    pub min: Option<i64>,
    /// `DefaultMaximum`, `None` when absent or not an integer.
    pub max: Option<i64>,
}

impl StoredPair {
    fn set(&mut self, field: Field, value: Option<i64>) {
        match field {
            Field::Minimum => self.min = value,
            Field::Maximum => self.max = value,
        }
    }

    /// Defaults derived from these values.
    fn defaults(self) -> (i32, i32) {
        let fit = |v: Option<i64>| v.and_then(|v| i32::try_from(v).ok());
        match (fit(self.min), fit(self.max)) {
            (Some(min), Some(max)) if min <= max => (min, max),
            _ => FALLBACK,
        }
    }
}

/// Observable state for oracle comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservableState {
    /// Defaults in effect, `(min, max)`.
    pub defaults: (i32, i32),
    /// Values the processor is working with.
    pub loaded: StoredPair,
    /// Values that survive a restart.
    pub persisted: StoredPair,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    defaults: (i32, i32),
    loaded: StoredPair,
    persisted: StoredPair,
}

impl ModelWorld {
    /// World whose store starts with `min` and `max`.
    pub fn new(min: StoredValue, max: StoredValue) -> Self {
        let stored = StoredPair { min: min.as_int(), max: max.as_int() };
        Self { defaults: stored.defaults(), loaded: stored, persisted: stored }
    }

    /// Defaults in effect.
    pub fn defaults(&self) -> (i32, i32) {
        self.defaults
    }

    /// Apply an operation and return the result.
    ///
    /// The result should match the real implementation's result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Invoke { actor, args } => match self.invoke(*actor, args) {
                Ok(result) => result,
                Err(err) => OperationResult::Rejected(err.to_string()),
            },
            Operation::EditStoredConfig { field, value } => {
                self.persisted.set(*field, value.as_int());
                OperationResult::Edited
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState { defaults: self.defaults, loaded: self.loaded, persisted: self.persisted }
    }

    fn invoke(&mut self, actor: Actor, args: &[Token]) -> Result<OperationResult, CommandError> {
        match args.split_first() {
            None => {
                require(actor, Permission::Defaults)?;
                Ok(rolled(self.defaults))
            },
            Some((Token::SetMin { .. }, operands)) => self.set(actor, Bound::Minimum, operands),
            Some((Token::SetMax { .. }, operands)) => self.set(actor, Bound::Maximum, operands),
            Some((Token::Reload, _)) => {
                require(actor, Permission::Admin)?;
                self.loaded = self.persisted;
                self.defaults = self.loaded.defaults();
                Ok(OperationResult::Replied(vec![
                    "Configuration reloaded.".to_owned(),
                    format!("Current default min:{}", self.defaults.0),
                    format!("Current default max:{}", self.defaults.1),
                ]))
            },
            Some(_) => self.roll_custom(actor, args),
        }
    }

    fn roll_custom(&self, actor: Actor, args: &[Token]) -> Result<OperationResult, CommandError> {
        let mut values = Vec::with_capacity(args.len());
        for token in args {
            let value = token
                .as_int()
                .ok_or_else(|| CommandError::NonIntegerArgument { token: token.render() })?;
            values.push(value);
        }

        require(actor, Permission::Custom)?;

        let (default_min, _) = self.defaults;
        match values[..] {
            [max] if max < default_min => {
                Err(RangeViolation::BelowDefaultMin { max, default_min }.into())
            },
            [max] => Ok(rolled((default_min, max))),
            [min, max] if max < min => Err(RangeViolation::Reversed { min, max }.into()),
            [min, max] => Ok(rolled((min, max))),
            _ => Err(CommandError::InvalidArgumentCount { given: values.len() }),
        }
    }

    fn set(
        &mut self,
        actor: Actor,
        bound: Bound,
        operands: &[Token],
    ) -> Result<OperationResult, CommandError> {
        require(actor, Permission::Admin)?;

        let value = match operands {
            [] => return Err(CommandError::MissingOperand(bound)),
            [token] => token
                .as_int()
                .ok_or_else(|| CommandError::NonIntegerOperand { bound, token: token.render() })?,
            _ => return Err(CommandError::TooManyArguments),
        };

        let (min, max) = self.defaults;
        let (field, updated) = match bound {
            Bound::Minimum if value > max => {
                return Err(RangeViolation::MinAboveDefaultMax { min: value, default_max: max }.into());
            },
            Bound::Maximum if value < min => {
                return Err(RangeViolation::MaxBelowDefaultMin { max: value, default_min: min }.into());
            },
            Bound::Minimum => (Field::Minimum, (value, max)),
            Bound::Maximum => (Field::Maximum, (min, value)),
        };

        // Saving writes every loaded value, clobbering pending hand edits.
        self.loaded.set(field, Some(i64::from(value)));
        self.persisted = self.loaded;
        self.defaults = updated;

        Ok(OperationResult::Replied(vec![format!("Default {} set to {value}", bound.title())]))
    }
}

fn require(actor: Actor, permission: Permission) -> Result<(), CommandError> {
    if actor.holds(permission) { Ok(()) } else { Err(CommandError::PermissionDenied(permission)) }
}

fn rolled((min, max): (i32, i32)) -> OperationResult {
    OperationResult::Rolled { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoke(actor: Actor, args: &[Token]) -> Operation {
        Operation::Invoke { actor, args: args.to_vec() }
    }

    #[test]
    fn reversed_store_falls_back() {
        let world = ModelWorld::new(StoredValue::Int(9), StoredValue::Int(3));
        assert_eq!(world.defaults(), (1, 6));
    }

    #[test]
    fn setmin_then_roll() {
        let mut world = ModelWorld::new(StoredValue::Int(1), StoredValue::Int(6));

        let set = world.apply(&invoke(Actor::Admin, &[Token::SetMin { shout: false }, Token::Int(4)]));
        assert_eq!(set, OperationResult::Replied(vec!["Default Minimum set to 4".into()]));

        let roll = world.apply(&invoke(Actor::Player, &[]));
        assert_eq!(roll, OperationResult::Rolled { min: 4, max: 6 });
        assert_eq!(world.observable_state().persisted.min, Some(4));
    }

    #[test]
    fn save_clobbers_hand_edit_of_other_key() {
        let mut world = ModelWorld::new(StoredValue::Int(1), StoredValue::Int(6));

        world.apply(&Operation::EditStoredConfig { field: Field::Maximum, value: StoredValue::Int(50) });
        world.apply(&invoke(Actor::Admin, &[Token::SetMin { shout: true }, Token::Int(2)]));

        assert_eq!(world.observable_state().persisted, StoredPair { min: Some(2), max: Some(6) });
    }

    #[test]
    fn integer_check_precedes_permission_check() {
        let mut world = ModelWorld::new(StoredValue::Int(1), StoredValue::Int(6));

        let result = world.apply(&invoke(Actor::Guest, &[Token::Int(3), Token::Junk]));
        assert_eq!(result, OperationResult::Rejected("Custom range values need to be integers!".into()));

        let result = world.apply(&invoke(Actor::Guest, &[Token::SetMax { shout: false }, Token::Junk]));
        assert_eq!(
            result,
            OperationResult::Rejected("You need permission 'srn.admin' to use this command.".into())
        );
    }
}
