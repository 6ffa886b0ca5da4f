//! Server error types.

use std::fmt;

use srn_core::ConfigError;

use crate::roster::RosterError;

/// Errors that can occur in the console host.
#[derive(Debug)]
pub enum ServerError {
    /// Configuration error
    Config(ConfigError),

    /// Invalid `--player` / `--op` arguments
    Roster(RosterError),

    /// Console I/O error
    Io(String),

    /// A console line that cannot be run
    Console(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {}", err),
            Self::Roster(err) => write!(f, "roster error: {}", err),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Console(msg) => write!(f, "console error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Roster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<RosterError> for ServerError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn config_error_is_source() {
        let err = ServerError::from(ConfigError::Parse("bad yaml".into()));
        assert_eq!(err.to_string(), "configuration error: malformed configuration: bad yaml");
        assert!(err.source().is_some());
    }

    #[test]
    fn io_error_converts() {
        let err = ServerError::from(std::io::Error::other("stdin closed"));
        assert_eq!(err.to_string(), "I/O error: stdin closed");
        assert!(err.source().is_none());
    }
}
