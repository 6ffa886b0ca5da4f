//! Production Environment implementation using OS randomness.
//!
//! This module provides `SystemEnv`, the production implementation of the
//! `Environment` trait.

use srn_core::Environment;

/// Production environment backed by the OS entropy pool.
///
/// Uses `getrandom`, so every roll is unpredictable to players even if they
/// observe earlier results.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            // NOTE: This should never fail on supported platforms. Rolls still
            // have to complete, so degrade to a fixed buffer and say so loudly.
            tracing::error!("getrandom failed: {}", e);
            buffer.fill(0);
        });
    }
}
