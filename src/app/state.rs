//! Render coordinator and main state machine for mdtail.
//!
//! [RenderCoordinator] owns the [DocumentSet], the [ChangeWatcher] and the painter.
//! Watch threads, the keyboard and the Ctrl+C handler only send [ViewerEvent]s over
//! one crossbeam channel; the coordinator consumes them one at a time on the main thread,
//! so the selected index is never mutated from two places at once.
//!
//! States: `Idle -> Rendering -> Watching`, back to `Rendering` for every render,
//! and finally `Terminated`, after which every event is a no-op.

use crate::app::nav::{self, Direction};
use crate::app::tab::DocumentSet;
use crate::core::formatter::{self, FAREWELL};
use crate::core::fm::ContentReader;
use crate::core::watcher::{ChangeWatcher, ModToken};
use crate::error::ViewerError;
use crate::ui::painter::{Painter, Screen};

use crossbeam_channel::Sender;

use std::time::{Duration, Instant};

/// Typed events consumed by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    ChangeDetected { index: usize, modified: ModToken },
    NavigatePrev,
    NavigateNext,
    Terminate,
    Resize,
}

/// Whether the event loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Rendering,
    Watching,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderReason {
    Startup,
    Navigation,
    Change,
    Settle,
}

/// Which document gets rendered and why. Lives for a single render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub index: usize,
    pub reason: RenderReason,
}

pub struct RenderCoordinator<R: ContentReader, P: Painter> {
    documents: DocumentSet,
    reader: R,
    painter: P,
    watcher: ChangeWatcher,
    events: Sender<ViewerEvent>,
    state: CoordinatorState,
    settle_delay: Duration,
    settle_at: Option<Instant>,
    last_render: Option<RenderRequest>,
}

impl<R: ContentReader, P: Painter> RenderCoordinator<R, P> {
    /// `events` is the sending half of the loop's channel, handed to the watch threads.
    pub fn new(
        documents: DocumentSet,
        reader: R,
        painter: P,
        poll_interval: Duration,
        settle_delay: Duration,
        events: Sender<ViewerEvent>,
    ) -> Self {
        Self {
            documents,
            reader,
            painter,
            watcher: ChangeWatcher::new(poll_interval),
            events,
            state: CoordinatorState::Idle,
            settle_delay,
            settle_at: None,
            last_render: None,
        }
    }

    /// Starts watching every document and renders the selected one.
    ///
    /// With more than one document a settle render is scheduled `settle_delay` from now.
    /// Does nothing unless the coordinator is idle.
    pub fn start(&mut self) {
        if self.state != CoordinatorState::Idle {
            return;
        }

        self.painter.clear_screen();
        self.painter.hide_cursor();

        let tx = self.events.clone();
        self.watcher
            .start_watching(self.documents.as_slice(), move |index, modified| {
                // the receiver only goes away once the loop has exited
                let _ = tx.send(ViewerEvent::ChangeDetected { index, modified });
            });

        if self.documents.len() > 1 {
            tracing::info!("Watching {} files", self.documents.len());
        } else {
            tracing::info!(path = %self.documents.selected().path().display(), "Watching file");
        }

        self.render(RenderReason::Startup);

        if self.documents.len() > 1 {
            self.settle_at = Some(Instant::now() + self.settle_delay);
        }
    }

    /// Applies one event. Returns [Flow::Exit] once terminated.
    pub fn handle(&mut self, event: ViewerEvent) -> Flow {
        if self.state == CoordinatorState::Terminated {
            return Flow::Exit;
        }

        match event {
            ViewerEvent::ChangeDetected { index, modified } => {
                self.documents.record_modified(index, modified);
                if index == self.documents.selected_index() || self.documents.len() == 1 {
                    self.render(RenderReason::Change);
                } else {
                    tracing::debug!(index, "change on background tab");
                }
            }
            ViewerEvent::NavigatePrev => self.navigate(Direction::Previous),
            ViewerEvent::NavigateNext => self.navigate(Direction::Next),
            ViewerEvent::Resize => self.repaint(),
            ViewerEvent::Terminate => {
                self.shutdown();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn navigate(&mut self, direction: Direction) {
        if nav::navigate(direction, &mut self.documents) {
            self.render(RenderReason::Navigation);
        }
    }

    /// Fires the settle render once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.state == CoordinatorState::Terminated {
            return;
        }
        if let Some(deadline) = self.settle_at
            && now >= deadline
        {
            self.settle_at = None;
            self.render(RenderReason::Settle);
        }
    }

    /// Next instant at which [Self::tick] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle_at
    }

    /// Redraws the last screen without reading the document again.
    pub fn repaint(&mut self) {
        if self.state == CoordinatorState::Terminated {
            return;
        }
        if let Err(e) = self.painter.redraw() {
            tracing::warn!(error = %e, "repaint failed");
        }
    }

    /// Stops all watches, restores the cursor and says goodbye. Irreversible.
    pub fn shutdown(&mut self) {
        if self.state == CoordinatorState::Terminated {
            return;
        }
        self.watcher.stop_all();
        self.settle_at = None;
        self.painter.show_cursor();
        self.painter.farewell(FAREWELL);
        self.state = CoordinatorState::Terminated;
        tracing::info!("viewer stopped");
    }

    /// Reads the selected document fresh and paints it.
    ///
    /// A read failure is shown as an error line, the previous content stays visible.
    fn render(&mut self, reason: RenderReason) {
        self.state = CoordinatorState::Rendering;

        let request = RenderRequest {
            index: self.documents.selected_index(),
            reason,
        };
        tracing::debug!(?request, "render");

        let doc = self.documents.selected();
        match self.reader.read(doc.path()) {
            Ok(content) => {
                let screen = Screen::new(
                    doc.display_name(),
                    content,
                    self.documents.display_names(),
                    request.index,
                );
                if let Err(e) = self.painter.paint(&screen) {
                    tracing::warn!(error = %e, "paint failed");
                }
            }
            Err(err) => {
                let message = match &err {
                    ViewerError::DocumentRead { path, source } => {
                        formatter::format_read_error(path, &source.to_string())
                    }
                    other => format!("Error: {}", other),
                };
                tracing::warn!(error = %err, "render skipped");
                if let Err(e) = self.painter.report_error(&message) {
                    tracing::warn!(error = %e, "error report failed");
                }
            }
        }

        self.last_render = Some(request);
        self.state = CoordinatorState::Watching;
    }

    // Getters

    #[inline]
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    #[inline]
    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    #[inline]
    pub fn painter(&self) -> &P {
        &self.painter
    }

    #[inline]
    pub fn watcher(&self) -> &ChangeWatcher {
        &self.watcher
    }

    #[inline]
    pub fn last_render(&self) -> Option<RenderRequest> {
        self.last_render
    }
}
