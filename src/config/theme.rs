//! Theme configuration options for mdtail
//!
//! This module defines the `[theme]` table of mdtail.toml.
//! Colors are names ("cyan", "darkgray") or hex codes ("#RRGGBB", "#RGB").
//!
//! # Examples
//! ```toml
//! [theme.accent]
//! fg = "#5f87af"
//! [theme.active_tab]
//! fg = "black"
//! bg = "cyan"
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Colors for every painted element.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    accent: ColorPair,
    title: ColorPair,
    active_tab: ColorPair,
    inactive_tab: ColorPair,
    content: ColorPair,
    footer: ColorPair,
    error: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            accent: ColorPair {
                fg: Color::Indexed(238),
                ..ColorPair::default()
            },
            title: ColorPair {
                fg: Color::Magenta,
                ..ColorPair::default()
            },
            active_tab: ColorPair {
                fg: Color::Cyan,
                ..ColorPair::default()
            },
            inactive_tab: ColorPair {
                fg: Color::DarkGray,
                ..ColorPair::default()
            },
            content: ColorPair::default(),
            footer: ColorPair {
                fg: Color::DarkGray,
                ..ColorPair::default()
            },
            error: ColorPair {
                fg: Color::Red,
                ..ColorPair::default()
            },
        }
    }
}

impl Theme {
    /// Internal defaults used when a user color is set to Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn accent_style(&self) -> Style {
        self.accent.style_or(&Theme::internal_defaults().accent)
    }

    pub fn title_style(&self) -> Style {
        self.title
            .style_or(&Theme::internal_defaults().title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn active_tab_style(&self) -> Style {
        self.active_tab
            .style_or(&Theme::internal_defaults().active_tab)
            .add_modifier(Modifier::BOLD)
    }

    pub fn inactive_tab_style(&self) -> Style {
        self.inactive_tab
            .style_or(&Theme::internal_defaults().inactive_tab)
    }

    pub fn content_style(&self) -> Style {
        self.content.style_or(&Theme::internal_defaults().content)
    }

    pub fn footer_style(&self) -> Style {
        self.footer.style_or(&Theme::internal_defaults().footer)
    }

    pub fn error_style(&self) -> Style {
        self.error.style_or(&Theme::internal_defaults().error)
    }
}

/// Foreground and background color of one element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    /// Replaces Reset colors with the ones from `other`.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_colors_override_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let theme: Theme = toml::from_str(
            r##"
            [active_tab]
            fg = "#ff0000"
            bg = "blue"
            "##,
        )?;
        let style = theme.active_tab_style();
        assert_eq!(style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(style.bg, Some(Color::Blue));
        Ok(())
    }

    #[test]
    fn reset_falls_back_to_internal_default() -> Result<(), Box<dyn std::error::Error>> {
        let theme: Theme = toml::from_str(
            r#"
            [error]
            fg = "default"
            "#,
        )?;
        assert_eq!(theme.error_style().fg, Some(Color::Red));
        Ok(())
    }
}
