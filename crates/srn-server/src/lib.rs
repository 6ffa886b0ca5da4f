//! Console host for the `srn` / `roll` command.
//!
//! This crate runs the core processor outside a game server using:
//! - Tokio for the stdin loop
//! - A YAML file for the config store
//! - OS randomness
//!
//! ## Architecture
//!
//! ```text
//! srn-server
//!   ├─ SystemEnv          (production Environment impl)
//!   ├─ FileConfigStore    (YAML-backed ConfigStore)
//!   ├─ Roster             (console + simulated players)
//!   ├─ ConsoleLine        (stdin grammar)
//!   ├─ CommandProcessor   (srn-core state machine)
//!   └─ ActionExecutor     (actions -> deliveries)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod console;
mod error;
mod executor;
mod roster;
pub mod storage;
mod system_env;

use std::path::PathBuf;

pub use console::ConsoleLine;
pub use error::ServerError;
pub use executor::{ActionExecutor, BroadcastPolicy, Delivery};
pub use roster::{CONSOLE_NAME, Member, Roster, RosterError};
use srn_core::{
    CommandProcessor, CommandSender, ConfigStore, Environment, Permission,
    template::strip_color_codes,
};
pub use storage::FileConfigStore;
pub use system_env::SystemEnv;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Host configuration for the console runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Path of the YAML config file
    pub config_path: PathBuf,
    /// Players to put online, as `name@world:x,y,z`
    pub players: Vec<String>,
    /// Players granted `srn.admin`
    pub operators: Vec<String>,
    /// Who sees nearby broadcasts besides the audience
    pub broadcast_policy: BroadcastPolicy,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.yml"),
            players: Vec::new(),
            operators: Vec::new(),
            broadcast_policy: BroadcastPolicy::default(),
        }
    }
}

/// Console host.
///
/// Wraps `CommandProcessor` with a roster of online users and turns its
/// actions into per-recipient deliveries.
pub struct Server<E: Environment = SystemEnv, C: ConfigStore = FileConfigStore> {
    /// The command state machine
    processor: CommandProcessor<E, C>,
    /// Who is online
    roster: Roster,
    /// Action delivery
    executor: ActionExecutor,
}

impl Server {
    /// Open the config file and build the roster.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The config file cannot be created, read, or parsed
    /// - A player spec is malformed or duplicated
    /// - An operator is not among the players
    pub fn open(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let store = FileConfigStore::open(&config.config_path)?;
        tracing::info!(path = %store.path().display(), "configuration loaded");

        let mut roster = Roster::new();
        for spec in &config.players {
            roster.join(spec.parse()?)?;
        }
        for name in &config.operators {
            roster.grant(name, Permission::Admin.node())?;
        }

        Ok(Self::new(SystemEnv::new(), store, roster, ActionExecutor::new(config.broadcast_policy)))
    }
}

impl<E: Environment, C: ConfigStore> Server<E, C> {
    /// Assemble a host from its parts.
    pub fn new(env: E, config: C, roster: Roster, executor: ActionExecutor) -> Self {
        Self { processor: CommandProcessor::new(env, config), roster, executor }
    }

    /// The command processor.
    pub fn processor(&self) -> &CommandProcessor<E, C> {
        &self.processor
    }

    /// Who is online.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Run one console line and return what each recipient sees.
    ///
    /// Blank lines produce nothing. Rejected commands still produce
    /// deliveries (the error reply); only lines naming an unknown command
    /// or an offline player are errors.
    pub fn dispatch_line(&mut self, line: &str) -> Result<Vec<Delivery>, ServerError> {
        let Some(parsed) = ConsoleLine::parse(line) else {
            return Ok(Vec::new());
        };

        if !self.processor.handles(parsed.label) {
            return Err(ServerError::Console(format!("unknown command '{}'", parsed.label)));
        }

        let invoker = match parsed.actor {
            Some(name) => self
                .roster
                .get(name)
                .ok_or_else(|| ServerError::Console(format!("'{name}' is not online")))?,
            None => self.roster.console(),
        };

        let outcome = self.processor.handle(invoker, &parsed.args);
        tracing::debug!(
            sender = invoker.name(),
            label = parsed.label,
            handled = outcome.handled,
            actions = outcome.actions.len(),
            "command processed"
        );

        Ok(self.executor.execute(&self.roster, invoker, outcome.actions))
    }

    /// Read commands from stdin until EOF or Ctrl-C.
    ///
    /// Deliveries are written to stdout as `[recipient] message` with colour
    /// codes removed.
    pub async fn run(mut self) -> Result<(), ServerError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(online = self.roster.len(), "console ready");

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted");
                    break;
                },
            };

            let Some(line) = line else {
                tracing::info!("console closed");
                break;
            };

            match self.dispatch_line(&line) {
                Ok(deliveries) => {
                    for delivery in deliveries {
                        let text = format!(
                            "[{}] {}\n",
                            delivery.recipient,
                            strip_color_codes(&delivery.message)
                        );
                        stdout.write_all(text.as_bytes()).await?;
                    }
                    stdout.flush().await?;
                },
                Err(e) => {
                    tracing::warn!("{}", e);
                },
            }
        }

        Ok(())
    }
}
