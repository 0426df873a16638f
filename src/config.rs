use crate::highlight::DEFAULT_THEME;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// User settings from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON or YAML dataset replacing the bundled snippets.
    pub dataset: Option<PathBuf>,
    /// Directory holding the key-value store and the log file.
    pub storage_dir: Option<PathBuf>,
    pub highlight: bool,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            storage_dir: None,
            highlight: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Values supplied on the command line; `Some` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dataset: Option<PathBuf>,
    pub storage_dir: Option<PathBuf>,
    pub no_highlight: bool,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("snipdeck").join("config.toml"))
    }

    /// Reads `path`, treating a missing file as all defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the explicit path if given, else the platform default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if overrides.dataset.is_some() {
            self.dataset = overrides.dataset;
        }
        if overrides.storage_dir.is_some() {
            self.storage_dir = overrides.storage_dir;
        }
        if overrides.no_highlight {
            self.highlight = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.highlight);
        assert_eq!(config.theme, DEFAULT_THEME);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "highlight = false\ndataset = \"/tmp/s.yaml\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.highlight);
        assert_eq!(config.dataset, Some(PathBuf::from("/tmp/s.yaml")));
        assert_eq!(config.theme, DEFAULT_THEME);
    }

    #[test]
    fn malformed_file_is_an_error_naming_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "highlight = \"sometimes\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn overrides_win() {
        let config = Config {
            storage_dir: Some(PathBuf::from("/from/file")),
            ..Default::default()
        }
        .apply(Overrides {
            dataset: Some(PathBuf::from("cli.json")),
            storage_dir: None,
            no_highlight: true,
        });

        assert_eq!(config.dataset, Some(PathBuf::from("cli.json")));
        assert_eq!(config.storage_dir, Some(PathBuf::from("/from/file")));
        assert!(!config.highlight);
    }
}
