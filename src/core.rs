//! Core runtime logic for mdtail.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [watcher]: polling change detection, one thread per document.
//! - [fm]: argument resolution and document reading.
//! - [formatter]: tab line, footer and error text helpers.
//! - [terminal]: terminal setup/teardown and the main event loop.

pub mod fm;
pub mod formatter;
pub mod terminal;
pub mod watcher;

pub use fm::{ContentReader, FsReader, Resolution, resolve_documents};
pub use watcher::{ChangeWatcher, ModToken};
