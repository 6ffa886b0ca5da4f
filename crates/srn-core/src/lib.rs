//! Simple random number command.
//!
//! Core of the `srn` / `roll` chat command: argument parsing, permission
//! checks, the persisted default range, and rendering of broadcast rolls.
//!
//! # Architecture
//!
//! The processor is a pure state machine that:
//! - Receives invocations from the host (sender + arguments)
//! - Produces actions for the host to execute (replies, broadcasts)
//! - Uses the `Environment` trait for randomness (deterministic testing)
//! - Uses the `ConfigStore` trait for durable defaults
//!
//! # Components
//!
//! - [`CommandProcessor`]: Validates, authorizes and applies commands
//! - [`Command`]: Classified invocation
//! - [`RollRange`]: Inclusive range with `min <= max`
//! - [`SrnAction`]: Actions produced by the processor
//! - [`ConfigStore`] / [`CommandSender`] / [`Environment`]: Host seams

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod action;
pub mod command;
pub mod config;
pub mod env;
mod error;
mod permission;
mod processor;
pub mod range;
pub mod sender;
pub mod template;

pub use action::{Audience, CommandOutcome, Roll, SrnAction, Tone};
pub use command::{Bound, COMMAND_ALIASES, COMMAND_NAME, Command, is_command_label};
pub use config::{ConfigError, ConfigKey, ConfigStore, ConfigValue, MemoryConfigStore};
pub use env::Environment;
pub use error::{CommandError, RangeViolation};
pub use permission::Permission;
pub use processor::CommandProcessor;
pub use range::{RangeError, RollRange};
pub use sender::{CommandSender, Location};
