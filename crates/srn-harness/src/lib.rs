//! Deterministic simulation harness for srn testing.
//!
//! Seeded implementations of the `Environment` and `ConfigStore` traits for
//! deterministic, reproducible testing, including injected storage faults.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the command
//! surface. Operations are applied to both the model and a [`SimWorld`]
//! running the real processor, and their observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chaotic_store;
pub mod model;
pub mod sim_env;
pub mod sim_world;

pub use chaotic_store::ChaoticConfigStore;
pub use model::{
    Actor, Field, ModelWorld, ObservableState, Operation, OperationResult, StoredPair, StoredValue,
    Token,
};
pub use sim_env::SimEnv;
pub use sim_world::SimWorld;
