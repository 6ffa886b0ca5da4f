//! Operations for model-based testing.
//!
//! Operations represent everything a user or operator can do to the command.
//! They are generated randomly (proptest strategies or `arbitrary` in the
//! fuzzer) and applied to both the model and the real processor.

use arbitrary::Arbitrary;
use srn_core::{Bound, CommandSender, ConfigValue, Permission};

/// Who runs a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Arbitrary)]
pub enum Actor {
    /// Holds every permission.
    Admin,
    /// Holds `srn.defaults` and `srn.custom`.
    Player,
    /// Holds nothing.
    Guest,
}

impl Actor {
    /// Whether this actor holds `permission`.
    pub fn holds(self, permission: Permission) -> bool {
        match self {
            Self::Admin => true,
            Self::Player => matches!(permission, Permission::Defaults | Permission::Custom),
            Self::Guest => false,
        }
    }
}

impl CommandSender for Actor {
    fn name(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::Player => "Player",
            Self::Guest => "Guest",
        }
    }

    fn has_permission(&self, node: &str) -> bool {
        Permission::ALL.iter().any(|p| p.node() == node && self.holds(*p))
    }
}

/// One argument token.
///
/// Integers are kept to `i8` so that ranges collide with the defaults often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Token {
    /// A decimal integer.
    Int(i8),
    /// `setmin`, upper-cased when `shout` is set.
    SetMin {
        /// Upper-case spelling.
        shout: bool,
    },
    /// `setmax`, upper-cased when `shout` is set.
    SetMax {
        /// Upper-case spelling.
        shout: bool,
    },
    /// `reload`
    Reload,
    /// Something that is neither a keyword nor an integer.
    Junk,
}

impl Token {
    /// Text as typed by the user.
    pub fn render(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::SetMin { shout: false } => "setmin".to_owned(),
            Self::SetMin { shout: true } => "SETMIN".to_owned(),
            Self::SetMax { shout: false } => "setmax".to_owned(),
            Self::SetMax { shout: true } => "SETMAX".to_owned(),
            Self::Reload => "reload".to_owned(),
            Self::Junk => "d20".to_owned(),
        }
    }

    /// The integer, if this token is one.
    pub fn as_int(self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(i32::from(value)),
            _ => None,
        }
    }
}

/// Which stored default an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Field {
    /// `DefaultMinimum`
    Minimum,
    /// `DefaultMaximum`
    Maximum,
}

impl Field {
    /// Matching processor bound.
    pub fn bound(self) -> Bound {
        match self {
            Self::Minimum => Bound::Minimum,
            Self::Maximum => Bound::Maximum,
        }
    }
}

/// Value written by a hand edit of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum StoredValue {
    /// A small integer.
    Int(i8),
    /// An integer outside `i32`.
    Huge,
    /// Not an integer at all.
    Garbage,
}

impl StoredValue {
    /// Integer view as a store would report it.
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(i64::from(value)),
            Self::Huge => Some(i64::from(i32::MAX) + 1),
            Self::Garbage => None,
        }
    }

    /// Config value to write.
    pub fn to_config(self) -> ConfigValue {
        match self.as_int() {
            Some(value) => ConfigValue::Int(value),
            None => ConfigValue::Text("lots".to_owned()),
        }
    }
}

/// Operations that can be applied to the system.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// `actor` runs the command with `args`.
    Invoke {
        /// Who runs it.
        actor: Actor,
        /// Arguments after the label.
        args: Vec<Token>,
    },

    /// Someone edits the persisted config while the server runs.
    ///
    /// Takes effect on the next reload, unless a save overwrites it first.
    EditStoredConfig {
        /// Key to change.
        field: Field,
        /// New value.
        value: StoredValue,
    },
}

impl Operation {
    /// Rendered argument strings of an `Invoke`; empty otherwise.
    pub fn rendered_args(&self) -> Vec<String> {
        match self {
            Self::Invoke { args, .. } => args.iter().map(|t| t.render()).collect(),
            Self::EditStoredConfig { .. } => Vec::new(),
        }
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior. Roll results are random,
/// so only the range is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// A roll was broadcast over `[min, max]`.
    Rolled {
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },

    /// The command succeeded with these replies.
    Replied(Vec<String>),

    /// The command was rejected with this message.
    Rejected(String),

    /// A config edit was applied.
    Edited,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}
