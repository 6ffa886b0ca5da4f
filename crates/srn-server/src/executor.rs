//! Delivery of processor actions to roster members.
//!
//! The executor turns [`SrnAction`]s into concrete per-recipient messages.
//! It does no I/O; the console loop writes the deliveries out.

use srn_core::{Audience, CommandSender, SrnAction, Tone, template::COLOR_CHAR};

use crate::roster::{Member, Roster};

/// Policy for who sees a nearby broadcast besides the players in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadcastPolicy {
    /// The console sees every broadcast, like a server log.
    #[default]
    EchoToConsole,

    /// Only the audience itself.
    AudienceOnly,
}

/// One message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Roster name of the recipient.
    pub recipient: String,
    /// Message text, colour codes included.
    pub message: String,
}

/// Executes processor actions against a roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionExecutor {
    policy: BroadcastPolicy,
}

impl ActionExecutor {
    /// Executor with the given broadcast policy.
    pub fn new(policy: BroadcastPolicy) -> Self {
        Self { policy }
    }

    /// The broadcast policy.
    pub fn policy(&self) -> BroadcastPolicy {
        self.policy
    }

    /// Resolve `actions` issued on behalf of `invoker`, in order.
    pub fn execute(&self, roster: &Roster, invoker: &Member, actions: Vec<SrnAction>) -> Vec<Delivery> {
        let mut deliveries = Vec::new();

        for action in actions {
            match action {
                SrnAction::Reply { message, tone } => deliveries.push(Delivery {
                    recipient: invoker.name().to_owned(),
                    message: styled(&message, tone),
                }),

                SrnAction::Broadcast { message, audience, roll } => {
                    let recipients: Vec<&Member> =
                        roster.iter().filter(|m| self.receives(m, &audience)).collect();
                    tracing::debug!(
                        sender = invoker.name(),
                        result = roll.result,
                        recipients = recipients.len(),
                        "broadcasting roll"
                    );
                    deliveries.extend(recipients.into_iter().map(|member| Delivery {
                        recipient: member.name().to_owned(),
                        message: message.clone(),
                    }));
                },
            }
        }

        deliveries
    }

    fn receives(&self, member: &Member, audience: &Audience) -> bool {
        match audience {
            Audience::Everyone => true,
            Audience::Nearby { origin, radius } => {
                let in_range = member.location().is_some_and(|at| origin.is_within(at, *radius));
                in_range || (member.is_console() && self.policy == BroadcastPolicy::EchoToConsole)
            },
        }
    }
}

/// Prefix a reply with the colour for its tone.
fn styled(message: &str, tone: Tone) -> String {
    match tone {
        Tone::Info => message.to_owned(),
        Tone::Notice => format!("{COLOR_CHAR}d{message}"),
        Tone::Error => format!("{COLOR_CHAR}c{message}"),
    }
}
