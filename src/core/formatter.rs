//! Display text formatting for mdtail.
//!
//! Builds the tab line, footer, title and error strings drawn by the painter
//! and fits them to the terminal width.

use crate::utils::readable_path;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use std::path::Path;

pub const TAB_SEPARATOR: &str = " │ ";
pub const SINGLE_FOOTER: &str = "Watching for changes... (Ctrl+C to exit)";
pub const FAREWELL: &str = "Stopping mdtail...";

// Tab stops used when expanding document text
const TAB_STOP: usize = 4;

/// Label of a single tab: `[name]` when active, ` name ` otherwise.
pub fn tab_label(name: &str, active: bool) -> String {
    if active {
        format!("[{}]", name)
    } else {
        format!(" {} ", name)
    }
}

/// Footer for multi-document mode, `selected` is zero based.
pub fn navigation_footer(selected: usize, total: usize) -> String {
    format!(
        "Tab {} of {}{}← → Navigate{}Ctrl+C Exit",
        selected + 1,
        total,
        TAB_SEPARATOR,
        TAB_SEPARATOR
    )
}

pub fn footer_text(selected: usize, total: usize) -> String {
    if total > 1 {
        navigation_footer(selected, total)
    } else {
        SINGLE_FOOTER.to_string()
    }
}

/// Line printed before the screen is taken over. Only multi-document mode has one.
pub fn startup_banner(total: usize) -> Option<String> {
    (total > 1).then(|| format!("Watching {} files. Use arrow keys to navigate.", total))
}

#[inline]
pub fn format_title(display_name: &str) -> String {
    display_name.to_uppercase()
}

/// One-line message for a document that could not be read.
pub fn format_read_error(path: &Path, cause: &str) -> String {
    format!(
        "Error: Unable to read file: {} ({})",
        readable_path(path),
        cause
    )
}

/// Expands tabs to the next multiple of four columns and drops control characters
/// other than newlines and ANSI escapes.
pub fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0;

    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = TAB_STOP - (col % TAB_STOP);
                out.push_str(&" ".repeat(spaces));
                col += spaces;
            }
            '\n' => {
                out.push('\n');
                col = 0;
            }
            '\x1b' => out.push(c),
            c if c.is_control() => {}
            c => {
                out.push(c);
                col += c.width().unwrap_or(0);
            }
        }
    }
    out
}

/// Cuts `line` so its display width does not exceed `width`.
///
/// Wide characters that would straddle the edge are dropped entirely.
pub fn truncate_to_width(line: &str, width: usize) -> String {
    if line.width() <= width {
        return line.to_string();
    }

    let mut out = String::with_capacity(width);
    let mut current_w = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }
        out.push(c);
        current_w += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_labels_bracket_the_active_tab() {
        assert_eq!(tab_label("b.md", true), "[b.md]");
        assert_eq!(tab_label("a.md", false), " a.md ");
    }

    #[test]
    fn banner_only_for_several_documents() {
        assert_eq!(
            startup_banner(3).as_deref(),
            Some("Watching 3 files. Use arrow keys to navigate.")
        );
        assert_eq!(startup_banner(1), None);
    }

    #[test]
    fn footers() {
        assert_eq!(
            footer_text(1, 3),
            "Tab 2 of 3 │ ← → Navigate │ Ctrl+C Exit"
        );
        assert_eq!(footer_text(0, 1), SINGLE_FOOTER);
    }

    #[test]
    fn title_is_upper_cased() {
        assert_eq!(format_title("todo.md"), "TODO.MD");
    }

    #[test]
    fn read_error_names_path_and_cause() {
        let msg = format_read_error(Path::new("/tmp/x.md"), "permission denied");
        assert_eq!(
            msg,
            "Error: Unable to read file: /tmp/x.md (permission denied)"
        );
    }

    #[test]
    fn expand_tabs_aligns_to_stops() {
        assert_eq!(expand_tabs("a\tb"), "a   b");
        assert_eq!(expand_tabs("\tx\n\ty"), "    x\n    y");
        assert_eq!(expand_tabs("bell\x07"), "bell");
    }

    #[test]
    fn truncate_respects_display_width() {
        let cases = vec![
            ("short", 10, "short"),
            ("exactly_10", 10, "exactly_10"),
            ("much_longer_line", 4, "much"),
            ("🦀🦀🦀", 5, "🦀🦀"),
        ];

        for (input, width, expected) in cases {
            let result = truncate_to_width(input, width);
            assert_eq!(result, expected, "input: '{}'", input);
            assert!(result.width() <= width);
        }
    }
}
