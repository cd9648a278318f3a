//! Optional `config.toml` with sheet defaults.
//!
//! ```toml
//! [sheet]
//! width = 10
//! height = 20
//! ```

use cellgrid_engine::engine::{MAX_LABEL_COLS, MAX_LABEL_ROWS};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            width: MAX_LABEL_COLS,
            height: MAX_LABEL_ROWS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet: SheetConfig,
}

impl Config {
    /// Apply command-line overrides and clamp the sheet to what labels can address.
    pub fn with_overrides(mut self, width: Option<usize>, height: Option<usize>) -> (Config, Vec<String>) {
        let mut warnings = Vec::new();
        if let Some(width) = width {
            self.sheet.width = width;
        }
        if let Some(height) = height {
            self.sheet.height = height;
        }

        let width = self.sheet.width.clamp(1, MAX_LABEL_COLS);
        if width != self.sheet.width {
            warnings.push(format!("Sheet width {} clamped to {}", self.sheet.width, width));
            self.sheet.width = width;
        }
        let height = self.sheet.height.clamp(1, MAX_LABEL_ROWS);
        if height != self.sheet.height {
            warnings.push(format!("Sheet height {} clamped to {}", self.sheet.height, height));
            self.sheet.height = height;
        }
        (self, warnings)
    }
}

/// Load the config from `config_file`, or from the user config dir when none
/// is given. Problems become warnings and the defaults are used.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.cloned().or_else(user_config_path);

    let Some(path) = config_path.as_ref() else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match read_config(path) {
        Ok(config) => (config, warnings),
        Err(err) => {
            warnings.push(err);
            (Config::default(), warnings)
        }
    }
}

fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str::<Config>(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_label_space() {
        let config = Config::default();
        assert_eq!(config.sheet.width, 26);
        assert_eq!(config.sheet.height, 99);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[sheet]\nwidth = 4\n").unwrap();
        assert_eq!(config.sheet, SheetConfig { width: 4, height: 99 });
        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sheet]\nwidth = 5\nheight = 6\n").unwrap();

        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty());
        assert_eq!(config.sheet, SheetConfig { width: 5, height: 6 });
    }

    #[test]
    fn test_load_config_problems_are_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let (config, warnings) = load_config(Some(&missing));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[sheet\nwidth = ").unwrap();
        let (config, warnings) = load_config(Some(&broken));
        assert_eq!(config, Config::default());
        assert!(warnings[0].starts_with("Failed to parse"));
    }

    #[test]
    fn test_overrides_and_clamping() {
        let (config, warnings) = Config::default().with_overrides(Some(3), None);
        assert_eq!(config.sheet, SheetConfig { width: 3, height: 99 });
        assert!(warnings.is_empty());

        let (config, warnings) = Config::default().with_overrides(Some(40), Some(0));
        assert_eq!(config.sheet, SheetConfig { width: 26, height: 1 });
        assert_eq!(warnings.len(), 2);
    }
}
