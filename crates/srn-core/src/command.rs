//! Parsing of `srn` / `roll` arguments.
//!
//! Parsing only classifies the invocation and checks integer syntax where the
//! permission check comes later. Operands of `setmin`/`setmax` are kept raw so
//! that an unauthorized sender learns about the permission before any typo.

use std::fmt;

use crate::{config::ConfigKey, error::CommandError};

/// Primary command name.
pub const COMMAND_NAME: &str = "srn";

/// Alternative labels for [`COMMAND_NAME`].
pub const COMMAND_ALIASES: [&str; 1] = ["roll"];

/// Whether `label` names this command (case-insensitive).
pub fn is_command_label(label: &str) -> bool {
    label.eq_ignore_ascii_case(COMMAND_NAME)
        || COMMAND_ALIASES.iter().any(|alias| label.eq_ignore_ascii_case(alias))
}

/// Which end of the default range a setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// `setmin`
    Minimum,
    /// `setmax`
    Maximum,
}

impl Bound {
    /// Subcommand keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Minimum => "setmin",
            Self::Maximum => "setmax",
        }
    }

    /// Config key holding this default.
    pub const fn key(self) -> ConfigKey {
        match self {
            Self::Minimum => ConfigKey::DefaultMinimum,
            Self::Maximum => ConfigKey::DefaultMaximum,
        }
    }

    /// `minimum` / `maximum`
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
        }
    }

    /// `Minimum` / `Maximum`
    pub const fn title(self) -> &'static str {
        match self {
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
        }
    }

    /// Parse the operands following the keyword into a single value.
    pub fn parse_operand(self, operands: &[&str]) -> Result<i32, CommandError> {
        match operands {
            [] => Err(CommandError::MissingOperand(self)),
            [token] => token.parse().map_err(|_| CommandError::NonIntegerOperand {
                bound: self,
                token: (*token).to_owned(),
            }),
            _ => Err(CommandError::TooManyArguments),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A classified invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `roll`
    RollDefault,

    /// `roll <ints...>`; the count is checked after authorization.
    RollCustom(Vec<i32>),

    /// `roll setmin|setmax [operands...]`
    SetDefault {
        /// Which default.
        bound: Bound,
        /// Everything after the keyword, unparsed.
        operands: &'a [&'a str],
    },

    /// `roll reload`; trailing tokens are ignored.
    Reload,
}

impl<'a> Command<'a> {
    /// Classify `args` (everything after the label).
    ///
    /// Subcommand keywords match case-insensitively. Anything else must be a
    /// list of integers.
    pub fn parse(args: &'a [&'a str]) -> Result<Self, CommandError> {
        let Some((first, rest)) = args.split_first() else {
            return Ok(Self::RollDefault);
        };

        if first.eq_ignore_ascii_case(Bound::Minimum.keyword()) {
            return Ok(Self::SetDefault { bound: Bound::Minimum, operands: rest });
        }
        if first.eq_ignore_ascii_case(Bound::Maximum.keyword()) {
            return Ok(Self::SetDefault { bound: Bound::Maximum, operands: rest });
        }
        if first.eq_ignore_ascii_case("reload") {
            return Ok(Self::Reload);
        }

        args.iter()
            .map(|token| {
                token.parse::<i32>().map_err(|_| CommandError::NonIntegerArgument {
                    token: (*token).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::RollCustom)
    }
}
