use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_CONFLICT_RETRIES: u32 = 1;
const DEFAULT_WAITING_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Runtime knobs for the matchmaking and turn services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Times a whole operation is re-run after losing a concurrent race
    pub conflict_retries: u32,
    /// WAITING matches idle longer than this are swept by `cancel_abandoned_matches`
    pub waiting_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            conflict_retries: DEFAULT_CONFLICT_RETRIES,
            waiting_timeout: Duration::from_secs(DEFAULT_WAITING_TIMEOUT_SECS),
        }
    }
}

impl EngineConfig {
    /// Read overrides from `LEXIBLUFF_CONFLICT_RETRIES` and
    /// `LEXIBLUFF_WAITING_TIMEOUT_SECS`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("LEXIBLUFF_CONFLICT_RETRIES") {
            config.conflict_retries = raw.trim().parse::<u32>().map_err(|_| {
                AppError::config(format!(
                    "LEXIBLUFF_CONFLICT_RETRIES must be a non-negative integer, got '{raw}'"
                ))
            })?;
        }

        if let Ok(raw) = env::var("LEXIBLUFF_WAITING_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!(
                    "LEXIBLUFF_WAITING_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                ))
            })?;
            if secs == 0 {
                return Err(AppError::config(
                    "LEXIBLUFF_WAITING_TIMEOUT_SECS must be greater than zero",
                ));
            }
            config.waiting_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_conflict_retries(mut self, retries: u32) -> Self {
        self.conflict_retries = retries;
        self
    }

    pub fn with_waiting_timeout(mut self, timeout: Duration) -> Self {
        self.waiting_timeout = timeout;
        self
    }
}
