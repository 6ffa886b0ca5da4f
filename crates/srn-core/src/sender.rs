//! Whoever issued a command, as seen by the processor.

/// A position in a named world.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// World (dimension) name. Locations in different worlds are never near.
    pub world: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Location {
    /// Create a location.
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self { world: world.into(), x, y, z }
    }

    /// Squared Euclidean distance, or `None` across worlds.
    pub fn distance_squared(&self, other: &Self) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        Some(dz.mul_add(dz, dy.mul_add(dy, dx * dx)))
    }

    /// Whether `other` is in the same world and at most `radius` away.
    pub fn is_within(&self, other: &Self, radius: f64) -> bool {
        radius >= 0.0 && self.distance_squared(other).is_some_and(|d| d <= radius * radius)
    }
}

/// The sender of a command.
///
/// Hosts implement this for players, the console, and anything else that can
/// issue commands. Permission lookup is by node string (e.g. `srn.admin`).
pub trait CommandSender {
    /// Display name substituted for `-sender`.
    fn name(&self) -> &str;

    /// Whether the sender holds the permission node.
    fn has_permission(&self, node: &str) -> bool;

    /// Current position, if the sender exists in a world.
    fn location(&self) -> Option<&Location> {
        None
    }
}

impl<S: CommandSender + ?Sized> CommandSender for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_permission(&self, node: &str) -> bool {
        (**self).has_permission(node)
    }

    fn location(&self) -> Option<&Location> {
        (**self).location()
    }
}
