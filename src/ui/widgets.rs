use crate::config::Theme;
use crate::core::formatter::{self, TAB_SEPARATOR};
use crate::ui::painter::Screen;

use ansi_to_tui::IntoText;
use ratatui::{
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Tab labels with the active one highlighted, cut at `width` columns.
pub fn tab_line(screen: &Screen, theme: &Theme, width: u16) -> Paragraph<'static> {
    let mut budget = width as usize;
    let mut spans = Vec::with_capacity(screen.tabs.len() * 2);

    for (i, name) in screen.tabs.iter().enumerate() {
        if i > 0 {
            push_fitting(&mut spans, &mut budget, TAB_SEPARATOR, theme.accent_style());
        }
        let active = i == screen.selected;
        let style = if active {
            theme.active_tab_style()
        } else {
            theme.inactive_tab_style()
        };
        push_fitting(&mut spans, &mut budget, &formatter::tab_label(name, active), style);
        if budget == 0 {
            break;
        }
    }

    Paragraph::new(Line::from(spans))
}

fn push_fitting(spans: &mut Vec<Span<'static>>, budget: &mut usize, text: &str, style: Style) {
    if *budget == 0 {
        return;
    }
    let fitted = formatter::truncate_to_width(text, *budget);
    *budget = budget.saturating_sub(fitted.width());
    spans.push(Span::styled(fitted, style));
}

/// Horizontal rule under the tab line.
pub fn rule(theme: &Theme, width: u16) -> Paragraph<'static> {
    Paragraph::new("─".repeat(width as usize)).style(theme.accent_style())
}

/// Bordered block holding the document text, titled with the display name.
pub fn content_block(screen: &Screen, theme: &Theme) -> Paragraph<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(Span::styled(format!(" {} ", screen.title), theme.title_style()));

    let raw = formatter::expand_tabs(&screen.content);
    let text = raw.into_text().unwrap_or_else(|_| Text::from(raw));

    Paragraph::new(text)
        .block(block)
        .style(theme.content_style())
        .wrap(Wrap { trim: false })
}

pub fn footer_line(screen: &Screen, theme: &Theme) -> Paragraph<'static> {
    let style = if screen.error.is_some() {
        theme.error_style()
    } else {
        theme.footer_style()
    };
    Paragraph::new(Span::styled(screen.footer(), style))
}
