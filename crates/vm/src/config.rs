//! Run configuration.

use std::time::Duration;

/// Default wall-clock budget for one run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Rounding of integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DivisionMode {
    /// Round toward negative infinity.
    #[default]
    Floor,
    /// Round toward zero, like C: divide magnitudes, then apply the sign
    /// given by the operands' signs.
    Truncate,
}

/// Simulator options.
///
/// In both division modes a division by zero yields 0 instead of halting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub division: DivisionMode,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            division: DivisionMode::Floor,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// C-style truncating division.
    pub fn truncating(mut self) -> Self {
        self.division = DivisionMode::Truncate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
