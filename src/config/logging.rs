//! Logging configuration for mdtail
//!
//! The terminal is owned by the viewer while it runs, so logs always go to a file.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "/tmp/mdtail.log"
//! ```
//!
//! `RUST_LOG` takes precedence over `level`, `MDTAIL_LOG` over the default file location.

use serde::Deserialize;

use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Logging {
    level: String,
    file: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Logging {
            level: "info".into(),
            file: None,
        }
    }
}

impl Logging {
    #[inline]
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Log file location: config value, then `MDTAIL_LOG`, then the user cache directory.
    pub fn file_path(&self) -> Option<PathBuf> {
        if let Some(file) = &self.file {
            return Some(file.clone());
        }
        if let Ok(path) = std::env::var("MDTAIL_LOG") {
            return Some(PathBuf::from(path));
        }
        dirs::cache_dir().map(|dir| dir.join("mdtail").join("mdtail.log"))
    }
}
