//! Terminal setup and the main event loop for mdtail.
//!
//! [TerminalGuard] owns raw mode, the alternate screen and the hidden cursor and gives
//! them back on drop, so every exit path restores the terminal.
//! [run_terminal] wires the watcher, keyboard and Ctrl+C sources into one channel
//! and feeds the coordinator until it asks to exit.

use crate::app::state::{Flow, RenderCoordinator, ViewerEvent};
use crate::app::{DocumentSet, Keymap};
use crate::config::Config;
use crate::core::fm::{ContentReader, FsReader};
use crate::core::formatter;
use crate::error::ViewerResult;
use crate::ui::painter::{Painter, TerminalPainter};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

// Keyboard poll timeout, one frame at 60fps
const INPUT_POLL: Duration = Duration::from_millis(16);
// Upper bound for a blocking wait when no input source is active
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Scoped terminal state: raw mode (interactive only), alternate screen and hidden cursor.
pub struct TerminalGuard {
    raw_mode: bool,
}

impl TerminalGuard {
    pub fn acquire(interactive: bool) -> io::Result<Self> {
        if interactive {
            enable_raw_mode()?;
        }
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            if interactive {
                let _ = disable_raw_mode();
            }
            return Err(e);
        }
        Ok(Self {
            raw_mode: interactive,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
    }
}

/// Best-effort restore used by the panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

/// Keyboard input is only read when both ends are a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Routes SIGINT into the event channel.
fn install_interrupt_handler(tx: Sender<ViewerEvent>) {
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = tx.send(ViewerEvent::Terminate);
    }) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }
}

/// Runs the viewer until a terminate event arrives.
///
/// Returns an error if terminal setup or keyboard input fails. The terminal is restored
/// and the farewell message printed in every case.
pub fn run_terminal(config: &Config, documents: DocumentSet) -> ViewerResult<()> {
    let interactive = is_interactive();
    let (tx, rx) = unbounded();
    install_interrupt_handler(tx.clone());
    let keymap = Keymap::from_config(config.keys());

    if let Some(banner) = formatter::startup_banner(documents.len()) {
        eprintln!("{}", banner);
    }

    let guard = TerminalGuard::acquire(interactive)?;
    let painter = TerminalPainter::new(
        CrosstermBackend::new(io::stdout()),
        config.theme().clone(),
    )?;

    let mut coordinator = RenderCoordinator::new(
        documents,
        FsReader,
        painter,
        config.general().poll_interval(),
        config.general().settle_delay(),
        tx,
    );
    coordinator.start();

    let result = event_loop(&mut coordinator, &rx, &keymap, interactive);
    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }

    coordinator.shutdown();
    let farewell = coordinator.painter().farewell_message().map(str::to_owned);
    drop(coordinator);
    drop(guard);

    if let Some(message) = farewell {
        println!("\n\n{}", message);
    }
    result
}

/// Main event loop: fires due timers, reads input and drains the channel.
/// Returns when the coordinator reports [Flow::Exit].
fn event_loop<R, P>(
    coordinator: &mut RenderCoordinator<R, P>,
    rx: &Receiver<ViewerEvent>,
    keymap: &Keymap,
    interactive: bool,
) -> ViewerResult<()>
where
    R: ContentReader,
    P: Painter,
{
    loop {
        coordinator.tick(Instant::now());

        if interactive {
            if event::poll(INPUT_POLL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(ev) = keymap.lookup(key)
                            && coordinator.handle(ev) == Flow::Exit
                        {
                            return Ok(());
                        }
                    }
                    Event::Resize(_, _) => {
                        coordinator.handle(ViewerEvent::Resize);
                    }
                    _ => {}
                }
            }
        } else {
            let timeout = coordinator
                .next_deadline()
                .map(|d| d.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_WAIT)
                .min(IDLE_WAIT);
            match rx.recv_timeout(timeout) {
                Ok(ev) => {
                    if coordinator.handle(ev) == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }

        while let Ok(ev) = rx.try_recv() {
            if coordinator.handle(ev) == Flow::Exit {
                return Ok(());
            }
        }
    }
}
