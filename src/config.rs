//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Policy for resolving the sliding window at the start of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowPolicy {
    /// Clamp the window to valid indices, producing partial windows near
    /// the series boundary. This is the default.
    #[default]
    Truncate,

    /// Reproduce the historical slice semantics: a negative window start
    /// counts from the end of the series, so early rows can pick up data
    /// from the end. When the wrapped start lands past the window end the
    /// slice is empty and the output row is all zeros.
    ///
    /// Only useful for bit-exact parity with previously published results.
    Wrap,
}

impl std::fmt::Display for WindowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowPolicy::Truncate => write!(f, "truncate"),
            WindowPolicy::Wrap => write!(f, "wrap"),
        }
    }
}

/// Configuration for a decentralization analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sliding-window size in days for temporal smoothing.
    ///
    /// Default: 3 (a centered-ish 3-day window).
    pub window: usize,

    /// Significance level for the binomial tests.
    ///
    /// Default: 0.05.
    pub alpha: f64,

    /// Boundary policy for the sliding window.
    pub policy: WindowPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: 3,
            alpha: 0.05,
            policy: WindowPolicy::default(),
        }
    }
}

impl Config {
    /// Create a config with the default window, alpha, and policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the window boundary policy.
    pub fn with_policy(mut self, policy: WindowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the window is zero or alpha is outside
    /// the open interval (0, 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::WindowZero);
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::AlphaOutOfRange { alpha: self.alpha });
        }
        Ok(())
    }
}

/// Errors for invalid configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Window size must be at least 1.
    WindowZero,
    /// Alpha must lie strictly between 0 and 1.
    AlphaOutOfRange {
        /// The rejected value.
        alpha: f64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::WindowZero => write!(f, "window size must be at least 1"),
            ConfigError::AlphaOutOfRange { alpha } => {
                write!(f, "alpha must be in (0, 1), got {}", alpha)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
