//! Terminal UI for mdtail.
//!
//! - [painter]: the [Painter] trait and its ratatui implementation
//! - [render]: frame layout
//! - [widgets]: tab line, content block and footer widgets

pub mod painter;
pub mod render;
pub mod widgets;

pub use painter::{Painter, Screen, TerminalPainter};
