/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verse_playback::PlayerConfig;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "verse.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

/// Settings of the simulated audio sink
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Milliseconds between clock ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Length given to tracks whose duration the catalog does not know
    #[serde(default = "default_track_secs")]
    pub default_track_secs: f64,

    /// Clock speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `verse.toml` in the working
    /// directory is used when present. `VERSE_`-prefixed environment
    /// variables override both (`VERSE_PLAYER__AUTOPLAY=true`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with VERSE_)
        settings = settings.add_source(
            config::Environment::with_prefix("VERSE")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if self.simulation.tick_ms == 0 {
            return Err(CliError::Config(
                "simulation.tick_ms must be positive".to_string(),
            ));
        }

        if !self.simulation.default_track_secs.is_finite() || self.simulation.default_track_secs <= 0.0 {
            return Err(CliError::Config(format!(
                "simulation.default_track_secs must be positive, got {}",
                self.simulation.default_track_secs
            )));
        }

        if !self.simulation.speed.is_finite() || self.simulation.speed <= 0.0 {
            return Err(CliError::Config(format!(
                "simulation.speed must be positive, got {}",
                self.simulation.speed
            )));
        }

        Ok(())
    }
}

// Default values
fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        default_track_secs: default_track_secs(),
        speed: default_speed(),
    }
}

fn default_tick_ms() -> u64 {
    100
}

fn default_track_secs() -> f64 {
    180.0
}

fn default_speed() -> f64 {
    1.0
}

impl Default for SimulationSettings {
    fn default() -> Self {
        default_simulation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.tick_ms, 100);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn zero_speed_is_rejected() {
        let mut config = CliConfig::default();
        config.simulation.speed = 0.0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn player_errors_surface_as_config_errors() {
        let mut config = CliConfig::default();
        config.player.volume_step = 3.0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }
}
