//! The general configuration settings for mdtail.
//!
//! This module defines the [General] struct for deserializing the `[general]` table
//! of mdtail.toml: polling interval, settle delay, the default document and the
//! extensions accepted when resolving arguments.

use serde::Deserialize;

use std::time::Duration;

/// The smallest polling interval accepted from the config.
pub const MIN_POLL_INTERVAL_MS: u64 = 10;
/// Default polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
/// The largest polling interval accepted from the config.
pub const MAX_POLL_INTERVAL_MS: u64 = 10_000;
/// Default delay before the one-off repaint after startup.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1500;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    poll_interval_ms: u64,
    settle_delay_ms: u64,
    default_document: String,
    extensions: Vec<String>,
}

impl Default for General {
    fn default() -> Self {
        General {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            default_document: "TODO.md".into(),
            extensions: vec!["md".into()],
        }
    }
}

impl General {
    /// Returns the table with its polling interval forced into range.
    ///
    /// Runs while the config is loaded, before the terminal is taken over,
    /// so the warning stays readable.
    pub fn clamped(mut self) -> Self {
        self.poll_interval_ms = clamp_poll_interval(self.poll_interval_ms);
        self
    }

    #[inline]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[inline]
    pub fn default_document(&self) -> &str {
        &self.default_document
    }

    /// Extensions without the leading dot. Empty means any file.
    #[inline]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Clamp the polling interval, warning once on stderr when the value was out of range.
pub fn clamp_poll_interval(value: u64) -> u64 {
    let clamped = value.clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);
    if clamped != value {
        eprintln!(
            "Warning: poll_interval_ms={} out of range ({}..={}), clamped to {}",
            value, MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, clamped
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let g = General::default();
        assert_eq!(g.poll_interval(), Duration::from_millis(100));
        assert_eq!(g.settle_delay(), Duration::from_millis(1500));
        assert_eq!(g.default_document(), "TODO.md");
        assert_eq!(g.extensions(), ["md".to_string()]);
    }

    #[test]
    fn poll_interval_is_clamped() -> Result<(), Box<dyn std::error::Error>> {
        let g = toml::from_str::<General>("poll_interval_ms = 1")?.clamped();
        assert_eq!(g.poll_interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));

        let g = toml::from_str::<General>("poll_interval_ms = 999999")?.clamped();
        assert_eq!(g.poll_interval(), Duration::from_millis(MAX_POLL_INTERVAL_MS));

        let g = toml::from_str::<General>("poll_interval_ms = 250")?.clamped();
        assert_eq!(g.poll_interval(), Duration::from_millis(250));
        Ok(())
    }

    #[test]
    fn partial_table_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let g: General = toml::from_str(r#"extensions = ["md", "txt"]"#)?;
        assert_eq!(g.extensions().len(), 2);
        assert_eq!(g.default_document(), "TODO.md");
        Ok(())
    }
}
