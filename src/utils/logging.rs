//! File based logging for mdtail.
//!
//! The viewer owns stdout while running, so the subscriber writes to a log file.
//! `RUST_LOG` takes precedence over the configured level.
//!
//! ```bash
//! RUST_LOG=mdtail=debug MDTAIL_LOG=/tmp/mdtail.log mdtail *.md
//! ```

use crate::config::Logging;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialize logging from the `[logging]` config.
///
/// Safe to call multiple times, only the first call takes effect.
/// Returns the log file path when logging was enabled.
pub fn init(config: &Logging) -> Option<PathBuf> {
    let path = config.file_path()?;
    let mut enabled = None;

    INIT.call_once(|| match open_log_file(&path) {
        Ok(file) => {
            let filter = build_filter(config.level());
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_timer(CompactTime)
                .with_filter(filter);

            if tracing_subscriber::registry()
                .with(fmt_layer)
                .try_init()
                .is_ok()
            {
                enabled = Some(path.clone());
            }
        }
        Err(e) => {
            eprintln!("[Warning] logging disabled, cannot open {}: {}", path.display(), e);
        }
    });

    enabled
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// `RUST_LOG` wins over the configured level. Invalid levels fall back to `info`.
fn build_filter(level: &str) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
