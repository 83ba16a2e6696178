//! Engine configuration.
//!
//! Games configure the runtime at table creation: player limits, bot
//! pacing, and the duration-estimation harness. Builder-style setters keep
//! call sites readable; every field has a sensible default.

use serde::{Deserialize, Serialize};

/// Configuration for the duration-estimation subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Number of concurrent simulated playouts per estimate.
    pub workers: usize,

    /// Safety ceiling: a playout that exceeds this many ticks is abandoned
    /// and recorded as a failure, guaranteeing worker termination.
    pub tick_ceiling: u64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            tick_ceiling: 200_000,
        }
    }
}

/// Runtime configuration for one table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum active (non-spectator) players required to start.
    pub min_players: usize,

    /// Maximum players admitted to the table.
    pub max_players: usize,

    /// Ticks a bot "thinks" before a decided action fires.
    /// Zero makes bots act on the next tick (used by fast-forward playouts).
    pub bot_think_ticks: u32,

    /// Duration estimation settings.
    pub estimate: EstimateConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 4,
            bot_think_ticks: 20,
            estimate: EstimateConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the player count range.
    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the bot think-tick pacing.
    #[must_use]
    pub fn with_bot_think_ticks(mut self, ticks: u32) -> Self {
        self.bot_think_ticks = ticks;
        self
    }

    /// Set the estimation worker count.
    #[must_use]
    pub fn with_estimate_workers(mut self, workers: usize) -> Self {
        self.estimate.workers = workers;
        self
    }

    /// Set the estimation tick ceiling.
    #[must_use]
    pub fn with_estimate_ceiling(mut self, ceiling: u64) -> Self {
        self.estimate.tick_ceiling = ceiling;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.estimate.workers, 5);
    }

    #[test]
    fn test_config_builders() {
        let config = EngineConfig::new()
            .with_players(3, 6)
            .with_bot_think_ticks(0)
            .with_estimate_workers(8)
            .with_estimate_ceiling(1_000);

        assert_eq!(config.min_players, 3);
        assert_eq!(config.max_players, 6);
        assert_eq!(config.bot_think_ticks, 0);
        assert_eq!(config.estimate.workers, 8);
        assert_eq!(config.estimate.tick_ceiling, 1_000);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::new().with_players(2, 8);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
