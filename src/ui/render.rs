//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the painter and the
//! layout helper that splits the screen into tab, content and footer chunks.
//!
//! This module stays pure rendering: it reads a [Screen] and the theme and produces widgets.

use crate::config::Theme;
use crate::ui::painter::Screen;
use crate::ui::widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunks {
    pub tabs: Option<Rect>,
    pub rule: Option<Rect>,
    pub content: Rect,
    pub footer: Rect,
}

pub fn render(frame: &mut Frame, screen: &Screen, theme: &Theme) {
    let chunks = layout_chunks(frame.area(), screen.has_tabs());

    if let (Some(tabs), Some(rule)) = (chunks.tabs, chunks.rule) {
        frame.render_widget(widgets::tab_line(screen, theme, tabs.width), tabs);
        frame.render_widget(widgets::rule(theme, rule.width), rule);
    }

    frame.render_widget(widgets::content_block(screen, theme), chunks.content);
    frame.render_widget(widgets::footer_line(screen, theme), chunks.footer);
}

/// Splits `area` into tab line, rule, content and footer.
///
/// The tab line and rule are only present in multi-document mode.
pub fn layout_chunks(area: Rect, has_tabs: bool) -> Chunks {
    if has_tabs {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        Chunks {
            tabs: Some(parts[0]),
            rule: Some(parts[1]),
            content: parts[2],
            footer: parts[3],
        }
    } else {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        Chunks {
            tabs: None,
            rule: None,
            content: parts[0],
            footer: parts[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_with_tabs_reserves_two_header_rows() {
        let chunks = layout_chunks(Rect::new(0, 0, 80, 20), true);
        assert_eq!(chunks.tabs.map(|r| r.height), Some(1));
        assert_eq!(chunks.rule.map(|r| r.y), Some(1));
        assert_eq!(chunks.content.y, 2);
        assert_eq!(chunks.content.height, 17);
        assert_eq!(chunks.footer.y, 19);
    }

    #[test]
    fn layout_without_tabs() {
        let chunks = layout_chunks(Rect::new(0, 0, 80, 20), false);
        assert!(chunks.tabs.is_none());
        assert_eq!(chunks.content.height, 19);
        assert_eq!(chunks.footer.height, 1);
    }
}
