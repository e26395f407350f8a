//! Miscellaneous utility functions for mdtail.
//!
//! - [cli]: command line parsing, help and version output
//! - [helpers]: color parsing and path display helpers
//! - [logging]: file based tracing setup

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{get_home, parse_color, readable_path, shorten_home_path};
