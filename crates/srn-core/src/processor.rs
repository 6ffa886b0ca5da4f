//! Command processor state machine.
//!
//! The `CommandProcessor` owns the default range and the config store. It
//! validates, authorizes and applies one command at a time, and returns
//! actions (replies, broadcasts) for the host to deliver. It never performs
//! message I/O itself.
//!
//! ## Design
//!
//! - Validate-then-act: every check runs before the first mutation, so a
//!   rejected command leaves the defaults and the store untouched
//! - Persist-then-commit: a new default is saved before it replaces the
//!   in-memory value, so a failed save changes nothing the sender can observe
//! - Errors never escape [`CommandProcessor::handle`]; they become
//!   [`Tone::Error`](crate::action::Tone::Error) replies

use crate::{
    action::{Audience, CommandOutcome, Roll, SrnAction},
    command::{Bound, Command, is_command_label},
    config::{ConfigKey, ConfigStore, DEFAULT_BROADCAST_MESSAGE},
    env::Environment,
    error::{CommandError, RangeViolation},
    permission::Permission,
    range::RollRange,
    sender::CommandSender,
    template::{Placeholders, render},
};

/// Processes `srn` / `roll` invocations.
///
/// # Type Parameters
///
/// - `E`: Environment implementation for randomness
/// - `C`: Config store holding the durable defaults
pub struct CommandProcessor<E: Environment, C: ConfigStore> {
    /// Source of randomness.
    env: E,

    /// Durable configuration.
    config: C,

    /// Current defaults; always `min <= max`.
    defaults: RollRange,
}

impl<E: Environment, C: ConfigStore> CommandProcessor<E, C> {
    /// Create a processor, deriving the defaults from `config`.
    ///
    /// Invalid stored defaults fall back to `[1, 6]` with a warning.
    pub fn new(env: E, config: C) -> Self {
        let defaults = stored_defaults(&config);
        tracing::info!(%defaults, "srn enabled");
        Self { env, config, defaults }
    }

    /// Current default range.
    pub fn default_range(&self) -> RollRange {
        self.defaults
    }

    /// The config store.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Mutable access to the config store, for hosts that edit it directly.
    pub fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }

    /// Whether `label` is one of this command's names.
    pub fn handles(&self, label: &str) -> bool {
        is_command_label(label)
    }

    /// Handle one invocation.
    ///
    /// `args` is everything after the command label. Rejections are reported
    /// as an error reply with `handled == false`.
    pub fn handle<S, A>(&mut self, sender: &S, args: &[A]) -> CommandOutcome
    where
        S: CommandSender + ?Sized,
        A: AsRef<str>,
    {
        let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match self.dispatch(sender, &tokens) {
            Ok(actions) => CommandOutcome { handled: true, actions },
            Err(err) => {
                if err.is_usage() {
                    tracing::debug!(sender = sender.name(), args = ?tokens, "rejected: {err}");
                } else {
                    tracing::warn!(sender = sender.name(), args = ?tokens, "rejected: {err}");
                }
                CommandOutcome { handled: false, actions: vec![SrnAction::error(err.to_string())] }
            },
        }
    }

    fn dispatch<S>(&mut self, sender: &S, tokens: &[&str]) -> Result<Vec<SrnAction>, CommandError>
    where
        S: CommandSender + ?Sized,
    {
        match Command::parse(tokens)? {
            Command::RollDefault => self.roll_default(sender),
            Command::RollCustom(values) => self.roll_custom(sender, &values),
            Command::SetDefault { bound, operands } => {
                authorize(sender, Permission::Admin)?;
                let value = bound.parse_operand(operands)?;
                self.update_default(bound, value)
            },
            Command::Reload => self.reload(sender),
        }
    }

    /// Roll within the current defaults. Requires `srn.defaults`.
    pub fn roll_default<S>(&self, sender: &S) -> Result<Vec<SrnAction>, CommandError>
    where
        S: CommandSender + ?Sized,
    {
        authorize(sender, Permission::Defaults)?;
        Ok(vec![self.broadcast_result(sender, self.defaults)])
    }

    /// Roll within a custom range. Requires `srn.custom`.
    ///
    /// One value is a maximum paired with the default minimum; two values are
    /// `min, max`.
    pub fn roll_custom<S>(&self, sender: &S, values: &[i32]) -> Result<Vec<SrnAction>, CommandError>
    where
        S: CommandSender + ?Sized,
    {
        authorize(sender, Permission::Custom)?;

        let range = match *values {
            [max] => self.defaults.with_max(max).map_err(|_| RangeViolation::BelowDefaultMin {
                max,
                default_min: self.defaults.min(),
            })?,
            [min, max] => {
                RollRange::new(min, max).map_err(|_| RangeViolation::Reversed { min, max })?
            },
            _ => return Err(CommandError::InvalidArgumentCount { given: values.len() }),
        };

        Ok(vec![self.broadcast_result(sender, range)])
    }

    /// Set the default minimum. Requires `srn.admin`.
    pub fn set_default_min<S>(
        &mut self,
        sender: &S,
        new_min: i32,
    ) -> Result<Vec<SrnAction>, CommandError>
    where
        S: CommandSender + ?Sized,
    {
        authorize(sender, Permission::Admin)?;
        self.update_default(Bound::Minimum, new_min)
    }

    /// Set the default maximum. Requires `srn.admin`.
    pub fn set_default_max<S>(
        &mut self,
        sender: &S,
        new_max: i32,
    ) -> Result<Vec<SrnAction>, CommandError>
    where
        S: CommandSender + ?Sized,
    {
        authorize(sender, Permission::Admin)?;
        self.update_default(Bound::Maximum, new_max)
    }

    fn update_default(&mut self, bound: Bound, value: i32) -> Result<Vec<SrnAction>, CommandError> {
        let current = self.defaults;
        let updated = match bound {
            Bound::Minimum => current.with_min(value).map_err(|_| {
                RangeViolation::MinAboveDefaultMax { min: value, default_max: current.max() }
            })?,
            Bound::Maximum => current.with_max(value).map_err(|_| {
                RangeViolation::MaxBelowDefaultMin { max: value, default_min: current.min() }
            })?,
        };

        let previous = self.config.entry(bound.key());
        self.config.set_int(bound.key(), i64::from(value));
        if let Err(err) = self.config.save() {
            self.config.restore(bound.key(), previous);
            return Err(err.into());
        }

        self.defaults = updated;
        tracing::info!(%bound, value, defaults = %updated, "default updated");

        Ok(vec![SrnAction::info(format!("Default {} set to {value}", bound.title()))])
    }

    /// Reload the config store and re-derive the defaults. Requires
    /// `srn.admin`.
    pub fn reload<S>(&mut self, sender: &S) -> Result<Vec<SrnAction>, CommandError>
    where
        S: CommandSender + ?Sized,
    {
        authorize(sender, Permission::Admin)?;

        self.config.reload()?;
        self.defaults = stored_defaults(&self.config);
        tracing::info!(defaults = %self.defaults, "configuration reloaded");

        Ok(vec![
            SrnAction::notice("Configuration reloaded."),
            SrnAction::info(format!("Current default min:{}", self.defaults.min())),
            SrnAction::info(format!("Current default max:{}", self.defaults.max())),
        ])
    }

    /// Draw from `range` and render the broadcast.
    ///
    /// No permission check; callers authorize first.
    pub fn broadcast_result<S>(&self, sender: &S, range: RollRange) -> SrnAction
    where
        S: CommandSender + ?Sized,
    {
        let result = self.env.random_in_range(range.min(), range.max());
        let roll = Roll { min: range.min(), max: range.max(), result };

        let template = self
            .config
            .get_string(ConfigKey::BroadcastMessage)
            .unwrap_or_else(|| DEFAULT_BROADCAST_MESSAGE.to_owned());
        let message = render(
            &template,
            &Placeholders { sender: sender.name(), min: roll.min, max: roll.max, result },
        );

        SrnAction::Broadcast { message, audience: self.audience(sender), roll }
    }

    fn audience<S>(&self, sender: &S) -> Audience
    where
        S: CommandSender + ?Sized,
    {
        let radius = self.config.get_int(ConfigKey::BroadcastDistance).filter(|d| *d >= 0);

        match (sender.location(), radius) {
            #[allow(clippy::cast_precision_loss)]
            (Some(origin), Some(radius)) => {
                Audience::Nearby { origin: origin.clone(), radius: radius as f64 }
            },
            _ => Audience::Everyone,
        }
    }
}

impl<E: Environment, C: ConfigStore + std::fmt::Debug> std::fmt::Debug for CommandProcessor<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandProcessor")
            .field("defaults", &self.defaults)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn authorize<S>(sender: &S, permission: Permission) -> Result<(), CommandError>
where
    S: CommandSender + ?Sized,
{
    if sender.has_permission(permission.node()) {
        Ok(())
    } else {
        Err(CommandError::PermissionDenied(permission))
    }
}

/// Defaults from the store, or the fallback if they are missing, out of
/// `i32` range, or reversed.
fn stored_defaults(config: &impl ConfigStore) -> RollRange {
    let bound = |key| config.get_int(key).and_then(|value| i32::try_from(value).ok());

    match (bound(ConfigKey::DefaultMinimum), bound(ConfigKey::DefaultMaximum)) {
        (Some(min), Some(max)) => RollRange::new(min, max).unwrap_or_else(|err| {
            tracing::warn!(
                "Default values in config are invalid ({err}), using {} and {} as defaults.",
                RollRange::FALLBACK.min(),
                RollRange::FALLBACK.max()
            );
            RollRange::FALLBACK
        }),
        (min, max) => {
            tracing::warn!(
                ?min,
                ?max,
                "Default values in config are missing, using {} and {} as defaults.",
                RollRange::FALLBACK.min(),
                RollRange::FALLBACK.max()
            );
            RollRange::FALLBACK
        },
    }
}
