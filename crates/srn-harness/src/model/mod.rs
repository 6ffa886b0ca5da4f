//! Reference model for model-based testing.
//!
//! The model is a direct restatement of the command rules with no parsing
//! layer, no actions and no store abstraction. It serves as the oracle
//! against which the real processor is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Deterministic: Same inputs produce same outputs
//! - Randomness is out of scope: rolls are compared by range only

pub mod operation;
mod world;

pub use operation::{Actor, Field, Operation, OperationResult, StoredValue, Token};
pub use world::{ModelWorld, ObservableState, StoredPair};
