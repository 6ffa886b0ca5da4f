//! Fuzz target for raw argument strings.
//!
//! Feeds arbitrary UTF-8 tokens straight into [`CommandProcessor::handle`],
//! including overflowing integers, signs, whitespace, and keyword lookalikes.
//!
//! # Invariants
//!
//! - Exactly one reply on rejection; `handled == false`
//! - A handled roll broadcasts a value inside its range
//! - Defaults in effect are always ordered
//! - NEVER panic on any input

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use srn_core::{CommandProcessor, MemoryConfigStore};
use srn_harness::{Actor, SimEnv};

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    seed: u64,
    default_min: i64,
    default_max: i64,
    actor: Actor,
    invocations: Vec<Vec<String>>,
}

fuzz_target!(|input: FuzzInput| {
    let store = MemoryConfigStore::with_defaults(input.default_min, input.default_max);
    let mut processor = CommandProcessor::new(SimEnv::with_seed(input.seed), store);

    for args in input.invocations.iter().take(64) {
        let outcome = processor.handle(&input.actor, args);

        if !outcome.handled {
            assert_eq!(outcome.actions.len(), 1);
            assert!(outcome.roll().is_none());
        }

        if let Some(roll) = outcome.roll() {
            assert!(roll.min <= roll.max);
            assert!((roll.min..=roll.max).contains(&roll.result));
        }

        let defaults = processor.default_range();
        assert!(defaults.min() <= defaults.max());
    }
});
