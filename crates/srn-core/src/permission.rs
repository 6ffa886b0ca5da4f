//! Permission nodes guarding each command.

use std::fmt;

/// Capabilities the command surface checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `roll` with no arguments.
    Defaults,
    /// `roll <max>` and `roll <min> <max>`.
    Custom,
    /// `setmin`, `setmax` and `reload`.
    Admin,
}

impl Permission {
    /// Every permission, in ascending order of privilege.
    pub const ALL: [Self; 3] = [Self::Defaults, Self::Custom, Self::Admin];

    /// The node string hosts look up, e.g. `srn.custom`.
    pub const fn node(self) -> &'static str {
        match self {
            Self::Defaults => "srn.defaults",
            Self::Custom => "srn.custom",
            Self::Admin => "srn.admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node())
    }
}
