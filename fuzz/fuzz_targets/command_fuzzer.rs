//! Differential fuzz target for the command processor.
//!
//! Runs the same operation sequence through the reference model and the real
//! processor and requires identical results at every step.
//!
//! # Strategy
//!
//! - Operation sequences: invocations by admins, players, and guests mixed
//!   with hand edits of the stored defaults
//! - Stored defaults: small, out-of-`i32`, or non-integer starting values
//! - Flaky store: a non-zero failure rate switches to invariant checks only
//!
//! # Invariants
//!
//! - Model and processor agree on every result and on the observable state
//! - Defaults in effect are always ordered
//! - Every drawn value lies in its broadcast range
//! - A rejected command changes neither the defaults nor either config copy
//! - NEVER panic on any argument list

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use srn_harness::{ModelWorld, Operation, OperationResult, SimWorld, StoredValue};

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    seed: u64,
    min: StoredValue,
    max: StoredValue,
    /// Store failure rate in percent; 0 enables the model comparison.
    failure_percent: u8,
    ops: Vec<Operation>,
}

fuzz_target!(|input: FuzzInput| {
    let percent = input.failure_percent % 101;
    let failure_rate = f64::from(percent) / 100.0;
    let mut real = SimWorld::with_failure_rate(input.min, input.max, input.seed, failure_rate);
    let mut model = (percent == 0).then(|| ModelWorld::new(input.min, input.max));

    for op in input.ops.iter().take(256) {
        let before = real.observable_state();
        let result = real.apply(op);
        let after = real.observable_state();

        if let Some(model) = model.as_mut() {
            assert_eq!(model.apply(op), result, "divergence on {op:?}");
            assert_eq!(model.observable_state(), after, "state divergence on {op:?}");
        }

        assert!(after.defaults.0 <= after.defaults.1, "defaults reversed: {:?}", after.defaults);

        match result {
            OperationResult::Rolled { min, max } => {
                let roll = real.last_roll();
                assert!(roll.is_some_and(|r| r.min == min && r.max == max));
                assert!(roll.is_some_and(|r| (min..=max).contains(&r.result)));
            },
            OperationResult::Rejected(_) => assert_eq!(before, after, "rejection mutated {op:?}"),
            OperationResult::Replied(_) | OperationResult::Edited => {},
        }
    }
});
