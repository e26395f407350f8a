//! Application state for mdtail.
//!
//! - [tab]: the watched [Document]s and the selected tab
//! - [nav]: wraparound tab navigation
//! - [keymap]: key bindings to viewer events
//! - [state]: the [RenderCoordinator] state machine

pub mod keymap;
pub mod nav;
pub mod state;
pub mod tab;

pub use keymap::Keymap;
pub use nav::{Direction, navigate};
pub use state::{
    CoordinatorState, Flow, RenderCoordinator, RenderReason, RenderRequest, ViewerEvent,
};
pub use tab::{Document, DocumentSet};
