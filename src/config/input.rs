//! Input configuration options for mdtail
//!
//! This module defines the `[keys]` table of mdtail.toml.
//! Key strings use the same syntax as the keymap parser: "Left", "l", "Ctrl+c", "<c-c>".

use serde::Deserialize;

/// Key bindings for every action
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    prev_tab: Vec<String>,
    next_tab: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(prev_tab, next_tab, quit);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            prev_tab: vec!["Left".into(), "h".into(), "Shift+Tab".into()],
            next_tab: vec!["Right".into(), "l".into(), "Tab".into()],
            quit: vec!["Ctrl+c".into(), "q".into()],
        }
    }
}
