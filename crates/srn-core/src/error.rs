//! Command error types.
//!
//! Display strings are what the sender sees.

use thiserror::Error;

use crate::{command::Bound, config::ConfigError, permission::Permission};

/// A range check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeViolation {
    /// `roll <max>` below the default minimum.
    #[error("Max ({max}) lower than the default min ({default_min})!")]
    BelowDefaultMin {
        /// Requested maximum.
        max: i32,
        /// Current default minimum.
        default_min: i32,
    },

    /// `roll <min> <max>` with the bounds reversed.
    #[error("Max ({max}) lower than your min ({min})!")]
    Reversed {
        /// Requested minimum.
        min: i32,
        /// Requested maximum.
        max: i32,
    },

    /// `setmin` above the current default maximum.
    #[error("Attempted new default min ({min}) higher than current default max ({default_max})!")]
    MinAboveDefaultMax {
        /// Requested default minimum.
        min: i32,
        /// Current default maximum.
        default_max: i32,
    },

    /// `setmax` below the current default minimum.
    #[error("Attempted new default max ({max}) lower than current default min ({default_min})!")]
    MaxBelowDefaultMin {
        /// Requested default maximum.
        max: i32,
        /// Current default minimum.
        default_min: i32,
    },
}

/// Errors from command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Sender lacks the permission node.
    #[error("You need permission '{0}' to use this command.")]
    PermissionDenied(Permission),

    /// A custom roll with neither one nor two values.
    #[error("Invalid number of arguments!")]
    InvalidArgumentCount {
        /// How many values were given.
        given: usize,
    },

    /// A roll argument that is not an integer.
    #[error("Custom range values need to be integers!")]
    NonIntegerArgument {
        /// First offending token.
        token: String,
    },

    /// `setmin`/`setmax` without a value.
    #[error("You need to specify a new {}!", .0.noun())]
    MissingOperand(Bound),

    /// `setmin`/`setmax` with more than one value.
    #[error("Too many arguments!")]
    TooManyArguments,

    /// `setmin`/`setmax` value that is not an integer.
    #[error("Default {} needs to be an integer!", .bound.title())]
    NonIntegerOperand {
        /// Which default was being set.
        bound: Bound,
        /// Offending token.
        token: String,
    },

    /// Bounds in the wrong order.
    #[error(transparent)]
    Range(#[from] RangeViolation),

    /// The config store failed to save or reload.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CommandError {
    /// Whether the sender could fix this by retyping the command.
    ///
    /// Permission and configuration failures are not usage mistakes.
    pub fn is_usage(&self) -> bool {
        match self {
            Self::PermissionDenied(_) | Self::Config(_) => false,

            Self::InvalidArgumentCount { .. }
            | Self::NonIntegerArgument { .. }
            | Self::MissingOperand(_)
            | Self::TooManyArguments
            | Self::NonIntegerOperand { .. }
            | Self::Range(_) => true,
        }
    }
}
