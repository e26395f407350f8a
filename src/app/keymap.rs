//! Key mapping for mdtail
//!
//! Parses the `[keys]` table into a lookup from key events to viewer events.
//! Unparseable key strings are skipped.

use crate::app::nav::Direction;
use crate::app::state::ViewerEvent;
use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Every action a key can trigger.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(Direction),
    System(SystemAction),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Quit,
}

impl Action {
    pub fn to_event(self) -> ViewerEvent {
        match self {
            Action::Nav(Direction::Previous) => ViewerEvent::NavigatePrev,
            Action::Nav(Direction::Next) => ViewerEvent::NavigateNext,
            Action::System(SystemAction::Quit) => ViewerEvent::Terminate,
        }
    }
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const CTRL_C: Key = Key {
    code: KeyCode::Char('c'),
    modifiers: KeyModifiers::CONTROL,
};

/// Stores the mapping from Key to action, which is built from the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    #[rustfmt::skip]
    pub fn from_config(keys: &Keys) -> Self {
        let mut map = HashMap::new();

        bind(keys.prev_tab(), Action::Nav(Direction::Previous),   &mut map);
        bind(keys.next_tab(), Action::Nav(Direction::Next),       &mut map);
        bind(keys.quit(),     Action::System(SystemAction::Quit), &mut map);

        // Raw mode swallows SIGINT, Ctrl+C must stay an exit whatever [keys] says
        map.insert(CTRL_C, Action::System(SystemAction::Quit));

        Keymap { map }
    }

    pub fn action(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals disagree on whether BackTab carries SHIFT, and upper-case chars may too.
        if key.modifiers.contains(KeyModifiers::SHIFT)
            && matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab)
        {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }

    /// Translates a key press into the event sent to the coordinator.
    pub fn lookup(&self, key: KeyEvent) -> Option<ViewerEvent> {
        self.action(key).map(Action::to_event)
    }
}

pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "pageup" => code = Some(KeyCode::PageUp),
            "pagedown" => code = Some(KeyCode::PageDown),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "tab" => code = Some(KeyCode::Tab),
            "backtab" => code = Some(KeyCode::BackTab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    // Shift+Tab arrives as BackTab
    if code == Some(KeyCode::Tab) && modifiers.contains(KeyModifiers::SHIFT) {
        code = Some(KeyCode::BackTab);
        modifiers.remove(KeyModifiers::SHIFT);
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, "ignoring unknown key binding"),
        }
    }
}
