//! Fault injection tests for srn.
//!
//! These tests validate that the processor handles a config store that
//! refuses to save or reload:
//! - A failed `setmin` / `setmax` leaves the defaults and the persisted
//!   config as they were
//! - A failed `reload` keeps the defaults in effect
//! - Rolls keep working while the store is down

use proptest::prelude::*;
use srn_harness::{Actor, Field, Operation, OperationResult, SimWorld, StoredValue, Token};

fn admin(args: Vec<Token>) -> Operation {
    Operation::Invoke { actor: Actor::Admin, args }
}

fn set_min(value: i8) -> Operation {
    admin(vec![Token::SetMin { shout: false }, Token::Int(value)])
}

fn set_max(value: i8) -> Operation {
    admin(vec![Token::SetMax { shout: false }, Token::Int(value)])
}

fn reload() -> Operation {
    admin(vec![Token::Reload])
}

fn is_config_failure(result: &OperationResult) -> bool {
    matches!(
        result,
        OperationResult::Rejected(message) if message.starts_with("Configuration error:")
    )
}

#[test]
fn failed_save_changes_nothing() {
    let mut world = SimWorld::with_failure_rate(StoredValue::Int(1), StoredValue::Int(6), 9, 1.0);
    let before = world.observable_state();

    let result = world.apply(&set_max(20));

    assert_eq!(
        result,
        OperationResult::Rejected(
            "Configuration error: configuration store unavailable: injected save failure".into()
        )
    );
    assert_eq!(world.observable_state(), before);
    assert_eq!(world.processor().config().failures(), 1);
}

#[test]
fn failed_save_keeps_unusable_stored_values() {
    let mut world = SimWorld::with_failure_rate(StoredValue::Huge, StoredValue::Int(6), 1, 1.0);
    let before = world.observable_state();
    assert_eq!(before.defaults, (1, 6));

    assert!(is_config_failure(&world.apply(&set_min(2))));
    assert_eq!(world.observable_state(), before);

    let mut world = SimWorld::with_failure_rate(StoredValue::Int(4), StoredValue::Garbage, 1, 1.0);
    let before = world.observable_state();

    assert!(is_config_failure(&world.apply(&set_max(9))));
    assert_eq!(world.observable_state(), before);
}

#[test]
fn failed_reload_keeps_defaults() {
    let mut world = SimWorld::with_failure_rate(StoredValue::Int(2), StoredValue::Int(8), 9, 1.0);

    world.apply(&Operation::EditStoredConfig {
        field: Field::Maximum,
        value: StoredValue::Int(3),
    });
    let result = world.apply(&reload());

    assert!(is_config_failure(&result));
    assert_eq!(world.observable_state().defaults, (2, 8));
}

#[test]
fn rolls_work_while_store_is_down() {
    let mut world = SimWorld::with_failure_rate(StoredValue::Int(1), StoredValue::Int(6), 9, 1.0);

    let roll = Operation::Invoke { actor: Actor::Player, args: vec![Token::Int(3), Token::Int(5)] };
    for _ in 0..20 {
        assert_eq!(world.apply(&roll), OperationResult::Rolled { min: 3, max: 5 });
    }
}

fn stored_value() -> impl Strategy<Value = StoredValue> {
    prop_oneof![
        3 => (-8i8..=24).prop_map(StoredValue::Int),
        1 => Just(StoredValue::Huge),
        1 => Just(StoredValue::Garbage),
    ]
}

proptest! {
    /// With a flaky store, a rejected setter changes nothing at all, and a
    /// successful one persists exactly the value now in effect.
    #[test]
    fn prop_flaky_store_never_splits_state(
        seed in any::<u64>(),
        min in stored_value(),
        max in stored_value(),
        values in prop::collection::vec((any::<bool>(), -8i8..=24, any::<bool>()), 1..80)
    ) {
        let mut world = SimWorld::with_failure_rate(min, max, seed, 0.3);

        for (is_min, value, then_reload) in values {
            let before = world.observable_state();
            let op = if is_min { set_min(value) } else { set_max(value) };
            let result = world.apply(&op);
            let after = world.observable_state();

            if result.is_ok() {
                prop_assert_eq!(after.persisted, after.loaded);
                if is_min {
                    prop_assert_eq!(Some(i64::from(after.defaults.0)), after.persisted.min);
                    prop_assert_eq!(before.defaults.1, after.defaults.1);
                } else {
                    prop_assert_eq!(Some(i64::from(after.defaults.1)), after.persisted.max);
                    prop_assert_eq!(before.defaults.0, after.defaults.0);
                }
            } else {
                prop_assert_eq!(before, after);
            }

            if then_reload {
                let before = world.observable_state();
                let result = world.apply(&reload());
                let after = world.observable_state();
                if is_config_failure(&result) {
                    prop_assert_eq!(before, after);
                } else {
                    prop_assert_eq!(after.loaded, after.persisted);
                }
            }

            prop_assert!(after.defaults.0 <= after.defaults.1);
        }
    }
}
