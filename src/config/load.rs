//! The main config loading module for mdtail.
//!
//! Handles loading and deserializing settings from `mdtail.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//! Out of range values are clamped while converting [RawConfig] into [Config].
//! A missing file means internal defaults. A broken file is reported on stderr and
//! also falls back to defaults, the viewer should still start.

use crate::config::{General, Keys, Logging, Theme};
use crate::error::{ViewerError, ViewerResult};
use crate::utils::{get_home, shorten_home_path};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Raw configuration as read from the toml file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    keys: Keys,
    theme: Theme,
    logging: Logging,
}

/// Main configuration struct for mdtail
#[derive(Debug, Default, Clone)]
pub struct Config {
    general: General,
    keys: Keys,
    theme: Theme,
    logging: Logging,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general.clamped(),
            keys: raw.keys,
            theme: raw.theme,
            logging: raw.logging,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// Called by the entry point at startup.
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads `path`. Returns `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> ViewerResult<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ViewerError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };
        Self::from_toml(&content, path).map(Some)
    }

    pub fn from_toml(content: &str, origin: &Path) -> ViewerResult<Self> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| ViewerError::Config {
                path: origin.to_path_buf(),
                message: e.message().to_string(),
            })
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn logging(&self) -> &Logging {
        &self.logging
    }

    /// Determine the default configuration file path.
    /// Checks the MDTAIL_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/mdtail/mdtail.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("MDTAIL_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("mdtail/mdtail.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/mdtail/mdtail.toml");
        }
        PathBuf::from("mdtail.toml")
    }

    /// Write the default configuration to `path`. Fails if the file already exists.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", shorten_home_path(path)),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_TOML)?;
        println!("Default config generated at {}", shorten_home_path(path));
        Ok(())
    }
}

pub const DEFAULT_CONFIG_TOML: &str = r##"# mdtail.toml - default configuration for mdtail

# Note:
# Commented values are the internal defaults of mdtail
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# poll_interval_ms = 100
# settle_delay_ms = 1500
# default_document = "TODO.md"
# extensions = ["md"]

[keys]
# prev_tab = ["Left", "h", "Shift+Tab"]
# next_tab = ["Right", "l", "Tab"]
# quit = ["Ctrl+c", "q"]

[theme]
# accent.fg = "#444444"
# title.fg = "magenta"
# active_tab.fg = "cyan"
# inactive_tab.fg = "darkgray"
# footer.fg = "darkgray"
# error.fg = "red"

[logging]
# level = "info"
# file = "/path/to/mdtail.log"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::general::MIN_POLL_INTERVAL_MS;
    use std::error;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn default_config_template_parses() -> Result<(), Box<dyn error::Error>> {
        let config = Config::from_toml(DEFAULT_CONFIG_TOML, Path::new("template"))?;
        assert_eq!(config.general().poll_interval(), Duration::from_millis(100));
        assert_eq!(config.keys().quit()[0], "Ctrl+c");
        Ok(())
    }

    #[test]
    fn missing_file_is_none() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        assert!(Config::load_from(&dir.path().join("absent.toml"))?.is_none());
        Ok(())
    }

    #[test]
    fn invalid_file_reports_path() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("mdtail.toml");
        fs::write(&path, "[general]\npoll_interval_ms = \"fast\"")?;

        match Config::load_from(&path) {
            Err(ViewerError::Config { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected config error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn sections_load_independently() -> Result<(), Box<dyn error::Error>> {
        let config = Config::from_toml(
            r#"
            [general]
            settle_delay_ms = 250

            [keys]
            quit = ["Esc"]
            "#,
            Path::new("inline"),
        )?;
        assert_eq!(config.general().settle_delay(), Duration::from_millis(250));
        assert_eq!(config.keys().quit(), ["Esc".to_string()]);
        assert_eq!(config.keys().next_tab()[0], "Right");
        Ok(())
    }

    #[test]
    fn out_of_range_poll_interval_is_clamped_on_load() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("mdtail.toml");
        fs::write(&path, "[general]\npoll_interval_ms = 0")?;

        let config = Config::load_from(&path)?.ok_or("config file should exist")?;
        assert_eq!(
            config.general().poll_interval(),
            Duration::from_millis(MIN_POLL_INTERVAL_MS)
        );
        Ok(())
    }

    #[test]
    fn generate_default_refuses_to_overwrite() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/mdtail.toml");
        Config::generate_default(&path)?;
        assert!(path.exists());

        let err = Config::generate_default(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }
}
