//! The terminal surface the coordinator paints on.
//!
//! [Painter] is the seam between the render state machine and the terminal.
//! [TerminalPainter] draws with ratatui on any backend, tests use `TestBackend`.

use crate::config::Theme;
use crate::core::formatter;
use crate::ui::render;

use ratatui::Terminal;
use ratatui::backend::Backend;
use std::error::Error;
use std::io;

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub title: String,
    pub content: String,
    pub tabs: Vec<String>,
    pub selected: usize,
    pub error: Option<String>,
}

impl Screen {
    pub fn new(display_name: &str, content: String, tabs: Vec<String>, selected: usize) -> Self {
        Self {
            title: formatter::format_title(display_name),
            content,
            tabs,
            selected,
            error: None,
        }
    }

    #[inline]
    pub fn has_tabs(&self) -> bool {
        self.tabs.len() > 1
    }

    /// Footer text, or the active error line.
    pub fn footer(&self) -> String {
        match &self.error {
            Some(err) => err.clone(),
            None => formatter::footer_text(self.selected, self.tabs.len().max(1)),
        }
    }
}

/// Presentation operations used by the render coordinator.
///
/// Cursor and clear operations are best-effort and never fail.
pub trait Painter {
    fn paint(&mut self, screen: &Screen) -> io::Result<()>;

    /// Shows `message` as a one-line error, keeping the last content on screen.
    fn report_error(&mut self, message: &str) -> io::Result<()>;

    /// Draws the last screen again, e.g. after a resize.
    fn redraw(&mut self) -> io::Result<()>;

    fn clear_screen(&mut self);
    fn hide_cursor(&mut self);
    fn show_cursor(&mut self);

    /// Final message shown once the viewer stops.
    fn farewell(&mut self, message: &str);
}

fn backend_err<E: Error + Send + Sync + 'static>(e: E) -> io::Error {
    io::Error::other(e)
}

/// ratatui implementation of [Painter].
pub struct TerminalPainter<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    last: Option<Screen>,
    farewell: Option<String>,
}

impl<B> TerminalPainter<B>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    pub fn new(backend: B, theme: Theme) -> io::Result<Self> {
        let terminal = Terminal::new(backend).map_err(backend_err)?;
        Ok(Self {
            terminal,
            theme,
            last: None,
            farewell: None,
        })
    }

    fn draw(&mut self) -> io::Result<()> {
        let Some(screen) = &self.last else {
            return Ok(());
        };
        let theme = &self.theme;
        self.terminal
            .draw(|frame| render::render(frame, screen, theme))
            .map_err(backend_err)?;
        Ok(())
    }

    pub fn last_screen(&self) -> Option<&Screen> {
        self.last.as_ref()
    }

    /// Message recorded by [Painter::farewell], printed once the terminal is restored.
    pub fn farewell_message(&self) -> Option<&str> {
        self.farewell.as_deref()
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B> Painter for TerminalPainter<B>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    fn paint(&mut self, screen: &Screen) -> io::Result<()> {
        let mut screen = screen.clone();
        screen.error = None;
        self.last = Some(screen);
        self.draw()
    }

    fn report_error(&mut self, message: &str) -> io::Result<()> {
        let screen = self.last.get_or_insert_with(Screen::default);
        screen.error = Some(message.to_string());
        self.draw()
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.terminal.autoresize().map_err(backend_err)?;
        self.draw()
    }

    fn clear_screen(&mut self) {
        if let Err(e) = self.terminal.clear() {
            tracing::debug!(error = %e, "clear screen failed");
        }
    }

    fn hide_cursor(&mut self) {
        if let Err(e) = self.terminal.hide_cursor() {
            tracing::debug!(error = %e, "hide cursor failed");
        }
    }

    fn show_cursor(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            tracing::debug!(error = %e, "show cursor failed");
        }
    }

    fn farewell(&mut self, message: &str) {
        self.farewell = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn buffer_text(painter: &TerminalPainter<TestBackend>) -> String {
        let buffer = painter.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn screen(tabs: &[&str], selected: usize, content: &str) -> Screen {
        let tabs: Vec<String> = tabs.iter().map(|s| s.to_string()).collect();
        let title = tabs[selected].clone();
        Screen::new(&title, content.to_string(), tabs, selected)
    }

    #[test]
    fn paints_tabs_content_and_footer() -> Result<(), Box<dyn std::error::Error>> {
        let mut painter = TerminalPainter::new(TestBackend::new(60, 10), Theme::default())?;
        painter.paint(&screen(&["a.md", "b.md"], 1, "hello world"))?;

        let text = buffer_text(&painter);
        assert!(text.contains(" a.md  │ [b.md]"), "{text}");
        assert!(text.contains("B.MD"), "{text}");
        assert!(text.contains("hello world"), "{text}");
        assert!(text.contains("Tab 2 of 2"), "{text}");
        Ok(())
    }

    #[test]
    fn single_document_has_no_tab_line() -> Result<(), Box<dyn std::error::Error>> {
        let mut painter = TerminalPainter::new(TestBackend::new(60, 8), Theme::default())?;
        painter.paint(&screen(&["todo.md"], 0, "- [ ] item"))?;

        let text = buffer_text(&painter);
        assert!(!text.contains("[todo.md]"), "{text}");
        assert!(text.contains("Watching for changes..."), "{text}");
        Ok(())
    }

    #[test]
    fn error_keeps_content_until_next_paint() -> Result<(), Box<dyn std::error::Error>> {
        let mut painter = TerminalPainter::new(TestBackend::new(70, 8), Theme::default())?;
        painter.paint(&screen(&["todo.md"], 0, "still here"))?;
        painter.report_error("Error: Unable to read file: /x/todo.md (gone)")?;

        let text = buffer_text(&painter);
        assert!(text.contains("still here"), "{text}");
        assert!(text.contains("Unable to read file"), "{text}");

        painter.paint(&screen(&["todo.md"], 0, "fresh"))?;
        let text = buffer_text(&painter);
        assert!(!text.contains("Unable to read file"), "{text}");
        assert!(text.contains("Watching for changes..."), "{text}");
        Ok(())
    }

    #[test]
    fn farewell_is_recorded() -> Result<(), Box<dyn std::error::Error>> {
        let mut painter = TerminalPainter::new(TestBackend::new(20, 4), Theme::default())?;
        assert_eq!(painter.farewell_message(), None);
        painter.farewell("Stopping mdtail...");
        assert_eq!(painter.farewell_message(), Some("Stopping mdtail..."));
        Ok(())
    }
}
