//! Configuration for mdtail.
//!
//! Settings are read from `mdtail.toml` (see [load::Config::default_path]):
//! - [general]: polling interval, settle delay, default document, allowed extensions
//! - [input]: key bindings for tab navigation and quitting
//! - [theme]: colors of the tab line, content border, footer and error line
//! - [logging]: log level and log file location
//!
//! Every section falls back to internal defaults when missing.

pub mod general;
pub mod input;
pub mod load;
pub mod logging;
pub mod theme;

pub use general::General;
pub use input::Keys;
pub use load::Config;
pub use logging::Logging;
pub use theme::Theme;
