//! Actions produced by the processor for the host to execute.

use crate::sender::Location;

/// How a reply should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Plain confirmation.
    Info,
    /// Something the sender should notice (e.g. a reload).
    Notice,
    /// The command was rejected.
    Error,
}

/// Who receives a broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum Audience {
    /// Every connected user.
    Everyone,
    /// Users in the same world within `radius` of `origin`.
    Nearby {
        /// Where the sender stood when rolling.
        origin: Location,
        /// Distance limit in blocks.
        radius: f64,
    },
}

/// A single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    /// Lower bound used.
    pub min: i32,
    /// Upper bound used.
    pub max: i32,
    /// Value drawn, always within `[min, max]`.
    pub result: i32,
}

/// Work the host performs on behalf of the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum SrnAction {
    /// Send a message to the invoking sender only.
    Reply {
        /// Message text.
        message: String,
        /// Presentation hint.
        tone: Tone,
    },

    /// Deliver a rendered roll to an audience.
    Broadcast {
        /// Rendered template, colour codes already translated.
        message: String,
        /// Recipients.
        audience: Audience,
        /// The draw the message describes.
        roll: Roll,
    },
}

impl SrnAction {
    /// Reply with [`Tone::Info`].
    pub fn info(message: impl Into<String>) -> Self {
        Self::Reply { message: message.into(), tone: Tone::Info }
    }

    /// Reply with [`Tone::Notice`].
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Reply { message: message.into(), tone: Tone::Notice }
    }

    /// Reply with [`Tone::Error`].
    pub fn error(message: impl Into<String>) -> Self {
        Self::Reply { message: message.into(), tone: Tone::Error }
    }

    /// The roll carried by a broadcast.
    pub fn roll(&self) -> Option<Roll> {
        match self {
            Self::Broadcast { roll, .. } => Some(*roll),
            Self::Reply { .. } => None,
        }
    }
}

/// Result of handling one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    /// True when the command completed; false when it was rejected.
    pub handled: bool,
    /// Replies and broadcasts to execute, in order.
    pub actions: Vec<SrnAction>,
}

impl CommandOutcome {
    /// The broadcast roll, if the command produced one.
    pub fn roll(&self) -> Option<Roll> {
        self.actions.iter().find_map(SrnAction::roll)
    }

    /// Texts of all replies, in order.
    pub fn replies(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().filter_map(|action| match action {
            SrnAction::Reply { message, .. } => Some(message.as_str()),
            SrnAction::Broadcast { .. } => None,
        })
    }
}
