use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the game
///
/// All lengths are in canvas units; the playable area spans
/// `[cell_size, bounds_*)` on each axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one grid cell
    pub cell_size: i32,
    /// Width of the drawing canvas
    pub canvas_width: i32,
    /// Height of the drawing canvas
    pub canvas_height: i32,
    /// Exclusive upper bound of the playable area on x
    pub bounds_width: i32,
    /// Exclusive upper bound of the playable area on y
    pub bounds_height: i32,
    /// Number of segments the snake starts with
    pub initial_length: usize,
    /// Tick interval in normal mode
    pub tick_interval_ms: u64,
    /// Tick interval while debug mode is on
    pub debug_tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            canvas_width: 800,
            canvas_height: 600,
            bounds_width: 768,
            bounds_height: 576,
            initial_length: 8,
            tick_interval_ms: 50,
            debug_tick_interval_ms: 200,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a small board, handy for tests
    pub fn small() -> Self {
        Self {
            bounds_width: 32 * 6,
            bounds_height: 32 * 6,
            canvas_width: 32 * 7,
            canvas_height: 32 * 7,
            initial_length: 3,
            ..Default::default()
        }
    }

    /// Check that the geometry is consistent
    pub fn validate(&self) -> Result<()> {
        let cell = self.cell_size;
        ensure!(cell > 0, "cell_size must be positive, got {}", cell);
        ensure!(
            self.bounds_width % cell == 0 && self.bounds_height % cell == 0,
            "bounds {}x{} must be multiples of cell_size {}",
            self.bounds_width,
            self.bounds_height,
            cell
        );
        ensure!(
            self.bounds_width >= 3 * cell && self.bounds_height >= 3 * cell,
            "bounds {}x{} must leave at least two playable cells per axis",
            self.bounds_width,
            self.bounds_height
        );
        ensure!(
            self.bounds_width <= self.canvas_width && self.bounds_height <= self.canvas_height,
            "bounds {}x{} do not fit in canvas {}x{}",
            self.bounds_width,
            self.bounds_height,
            self.canvas_width,
            self.canvas_height
        );
        ensure!(self.initial_length >= 1, "initial_length must be at least 1");
        let columns = (self.bounds_width / cell - 1) as usize;
        ensure!(
            self.initial_length <= columns,
            "initial_length {} does not fit in a row of {} cells",
            self.initial_length,
            columns
        );
        ensure!(
            self.tick_interval_ms > 0 && self.debug_tick_interval_ms > 0,
            "tick intervals must be positive"
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn debug_tick_interval(&self) -> Duration {
        Duration::from_millis(self.debug_tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.bounds_width, 768);
        assert_eq!(config.bounds_height, 576);
        assert_eq!(config.initial_length, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_intervals() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.debug_tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_small_config_is_valid() {
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_rejects_misaligned_bounds() {
        let config = GameConfig {
            bounds_width: 770,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bounds_outside_canvas() {
        let config = GameConfig {
            bounds_width: 832,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_snake() {
        let config = GameConfig {
            initial_length: 30,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_length": 4, "tick_interval_ms": 80 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.initial_length, 4);
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.cell_size, 32);
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 0 }}"#).unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
