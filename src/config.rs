use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{BoardDimensions, COLS, ROWS};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub ui: UiConfig,
}

/// Board size. Both dimensions must be at least 4.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
        }
    }
}

/// Terminal front end settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long the TUI waits for a key press before redrawing
    pub poll_interval_ms: u64,
    /// Column the selector starts on; the middle column when unset
    pub start_column: Option<usize>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            poll_interval_ms: 100,
            start_column: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = self.dimensions()?;
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }
        if let Some(col) = self.ui.start_column {
            if col >= dims.cols() {
                return Err(ConfigError::Validation(format!(
                    "ui.start_column must be < board.cols ({})",
                    dims.cols()
                )));
            }
        }
        Ok(())
    }

    /// Validated board dimensions.
    pub fn dimensions(&self) -> Result<BoardDimensions, ConfigError> {
        BoardDimensions::new(self.board.rows, self.board.cols)
    }

    /// Starting column for the TUI selector.
    pub fn start_column(&self) -> usize {
        self.ui.start_column.unwrap_or(self.board.cols / 2)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.dimensions().unwrap(), BoardDimensions::STANDARD);
        assert_eq!(config.start_column(), 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
cols = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.cols, 9);
        assert_eq!(config.board.rows, 6);
        assert_eq!(config.ui.poll_interval_ms, 100);
        assert_eq!(config.start_column(), 4);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.board.rows, ROWS);
        assert_eq!(config.board.cols, COLS);
        assert_eq!(config.ui.start_column, None);
    }

    #[test]
    fn test_validation_rejects_small_board() {
        let mut config = AppConfig::default();
        config.board.rows = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { rows: 3, cols: 7 })
        ));
    }

    #[test]
    fn test_validation_rejects_zero_poll_interval() {
        let mut config = AppConfig::default();
        config.ui.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_start_column_off_board() {
        let mut config = AppConfig::default();
        config.ui.start_column = Some(7);
        assert!(config.validate().is_err());
        config.ui.start_column = Some(6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.board.rows, ROWS);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
rows = 8
cols = 8

[ui]
start_column = 0
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.dimensions().unwrap(), BoardDimensions::new(8, 8).unwrap());
        assert_eq!(config.start_column(), 0);
        assert_eq!(config.ui.poll_interval_ms, 100);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nrows = 2\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::InvalidDimensions { .. })
        ));

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
