//! Online users the console host knows about.

use std::{collections::BTreeSet, str::FromStr};

use srn_core::{CommandSender, Location, Permission};
use thiserror::Error;

/// Name of the server console sender.
pub const CONSOLE_NAME: &str = "CONSOLE";

/// Errors parsing a `name@world:x,y,z` player spec or joining the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The spec does not have the `name@world:x,y,z` shape.
    #[error("invalid player spec '{0}', expected name@world:x,y,z")]
    InvalidSpec(String),

    /// A coordinate is not a number.
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    /// Someone with that name is already online.
    #[error("'{0}' is already online")]
    Duplicate(String),

    /// `--op` names someone who is not on the roster.
    #[error("'{0}' is not online")]
    NotOnline(String),
}

/// A user that can issue commands and receive messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: String,
    permissions: BTreeSet<String>,
    location: Option<Location>,
    console: bool,
}

impl Member {
    /// The server console: every permission, no location.
    pub fn console() -> Self {
        Self {
            name: CONSOLE_NAME.to_owned(),
            permissions: Permission::ALL.iter().map(|p| p.node().to_owned()).collect(),
            location: None,
            console: true,
        }
    }

    /// A player holding the default player permissions (`srn.defaults` and
    /// `srn.custom`).
    pub fn player(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            permissions: [Permission::Defaults, Permission::Custom]
                .iter()
                .map(|p| p.node().to_owned())
                .collect(),
            location: Some(location),
            console: false,
        }
    }

    /// Grant an extra permission node.
    #[must_use]
    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.insert(node.into());
        self
    }

    /// Whether this is the console.
    pub fn is_console(&self) -> bool {
        self.console
    }
}

impl CommandSender for Member {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node)
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl FromStr for Member {
    type Err = RosterError;

    /// Parse `name@world:x,y,z`.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || RosterError::InvalidSpec(spec.to_owned());

        let (name, place) = spec.split_once('@').ok_or_else(invalid)?;
        let (world, coords) = place.split_once(':').ok_or_else(invalid)?;
        if name.is_empty() || world.is_empty() || name.eq_ignore_ascii_case(CONSOLE_NAME) {
            return Err(invalid());
        }

        let coords = coords
            .split(',')
            .map(|c| c.trim().parse::<f64>().map_err(|_| RosterError::InvalidCoordinate(c.into())))
            .collect::<Result<Vec<_>, _>>()?;
        let &[x, y, z] = coords.as_slice() else {
            return Err(invalid());
        };

        Ok(Self::player(name, Location::new(world, x, y, z)))
    }
}

/// Everyone currently online. The console is always present.
#[derive(Debug, Clone)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    /// Roster holding only the console.
    pub fn new() -> Self {
        Self { members: vec![Member::console()] }
    }

    /// Add a member. Names are unique, ignoring case.
    pub fn join(&mut self, member: Member) -> Result<(), RosterError> {
        if self.get(member.name()).is_some() {
            return Err(RosterError::Duplicate(member.name().to_owned()));
        }
        tracing::debug!(name = member.name(), "joined");
        self.members.push(member);
        Ok(())
    }

    /// Grant `node` to an online player.
    pub fn grant(&mut self, name: &str, node: &str) -> Result<(), RosterError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| !m.console && m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RosterError::NotOnline(name.to_owned()))?;
        member.permissions.insert(node.to_owned());
        tracing::info!(name = %member.name, node, "granted permission");
        Ok(())
    }

    /// Look up a member by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// The console member.
    pub fn console(&self) -> &Member {
        // The console is inserted first by `new` and never removed.
        &self.members[0]
    }

    /// All members, console first.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Number of members including the console, so never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
