//! Configuration loading for simulation runs.
//!
//! Run settings can be loaded from a TOML configuration file. Every section
//! is optional and falls back to its defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Game and round settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial board source
    #[serde(default)]
    pub board: BoardConfig,
    /// Image output settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges that TOML types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.simulation.b.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "simulation.b must be finite, got {}",
                self.simulation.b
            )));
        }
        let fraction = self.board.defector_fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ConfigError::Invalid(format!(
                "board.defector_fraction must be within [0, 1], got {}",
                fraction
            )));
        }
        if self.board.random_rows == 0 || self.board.random_cols == 0 {
            return Err(ConfigError::Invalid(
                "board.random_rows and board.random_cols must be positive".to_string(),
            ));
        }
        if self.render.cell_size == 0 {
            return Err(ConfigError::Invalid(
                "render.cell_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Game and round settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Payoff a defector earns against a cooperator
    pub b: f64,
    /// Number of rounds to play
    pub rounds: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            b: 1.85,
            rounds: 40,
        }
    }
}

/// How the initial board is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board file to load. Takes precedence over generation settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Generation mode when no file is given
    pub layout: BoardLayout,
    /// Rows of a generated board
    pub random_rows: usize,
    /// Columns of a generated board
    pub random_cols: usize,
    /// Chance that a generated cell defects (random layout only)
    pub defector_fraction: f64,
    /// Seed for the random layout
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            path: None,
            layout: BoardLayout::SingleDefector,
            random_rows: 99,
            random_cols: 99,
            defector_fraction: 0.1,
            seed: 42,
        }
    }
}

/// Layout of a generated initial board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoardLayout {
    /// Cooperators everywhere except one defector in the middle
    #[default]
    SingleDefector,
    /// Each cell defects independently with `defector_fraction`
    Random,
}

/// Image output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Delay between animation frames
    pub frame_delay_ms: u32,
    /// Write the animated GIF of all generations
    pub write_gif: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 1,
            frame_delay_ms: 100,
            write_gif: true,
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for all run artifacts
    pub dir: PathBuf,
    /// Base file name for images
    pub name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            name: "Prisoners".to_string(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error serializing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Spatial Prisoner's Dilemma configuration

[simulation]
b = 1.85
rounds = 40

[board]
# path = "boards/f99.txt"
layout = "single_defector"
random_rows = 99
random_cols = 99
defector_fraction = 0.1
seed = 42

[render]
cell_size = 1
frame_delay_ms = 100
write_gif = true

[output]
dir = "output"
name = "Prisoners"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();

        assert_eq!(config.simulation.b, 1.85);
        assert_eq!(config.simulation.rounds, 40);
        assert_eq!(config.board.layout, BoardLayout::SingleDefector);
        assert_eq!(config.render.cell_size, 1);
        assert!(config.render.write_gif);
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [simulation]
            b = 1.6
            rounds = 5

            [board]
            layout = "random"
            random_rows = 20
            random_cols = 30
            seed = 7
        "#;

        let config = SimConfig::from_str(toml).unwrap();

        assert_eq!(config.simulation.b, 1.6);
        assert_eq!(config.simulation.rounds, 5);
        assert_eq!(config.board.layout, BoardLayout::Random);
        assert_eq!(config.board.random_rows, 20);
        assert_eq!(config.board.random_cols, 30);
        assert_eq!(config.board.seed, 7);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [simulation]
            rounds = 3
        "#;

        let config = SimConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.simulation.rounds, 3);
        // Default values
        assert_eq!(config.simulation.b, 1.85);
        assert_eq!(config.board.defector_fraction, 0.1);
        assert_eq!(config.output.name, "Prisoners");
    }

    #[test]
    fn test_board_path() {
        let toml = r#"
            [board]
            path = "boards/rand200.txt"
        "#;

        let config = SimConfig::from_str(toml).unwrap();
        assert_eq!(config.board.path, Some(PathBuf::from("boards/rand200.txt")));
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        let toml = r#"
            [board]
            defector_fraction = 1.5
        "#;

        let err = SimConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_rounds() {
        let toml = r#"
            [simulation]
            rounds = -1
        "#;

        assert!(matches!(
            SimConfig::from_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let toml = r#"
            [render]
            cell_size = 0
        "#;

        assert!(SimConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_config_to_toml() {
        let config = SimConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[simulation]"));
        assert!(toml.contains("[render]"));

        let parsed = SimConfig::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let toml = default_config_toml();
        let config = SimConfig::from_str(&toml).unwrap();

        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_layout_serialization() {
        assert_eq!(
            serde_json::to_string(&BoardLayout::SingleDefector).unwrap(),
            r#""single_defector""#
        );
        assert_eq!(
            serde_json::to_string(&BoardLayout::Random).unwrap(),
            r#""random""#
        );
    }
}
