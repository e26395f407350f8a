//! Polling change detection for watched documents.
//!
//! Every document gets its own named thread which stats the file once per interval and
//! compares the modification time with the last one it saw. A difference is reported once
//! through the `on_change` callback, then becomes the new baseline.
//!
//! Polling instead of OS notifications keeps behaviour identical across platforms and
//! filesystems (network mounts, editors that replace files on save).
//!
//! Each thread owns the receiving end of a zero-capacity stop channel. Dropping the sender
//! in [ChangeWatcher::stop_watching] disconnects the channel, which wakes the thread out of
//! its interval wait right away.

use crate::app::tab::Document;
use crate::error::{ViewerError, ViewerResult};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

/// Default interval between two polls of the same document.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Opaque modification marker of a document.
///
/// Compared with whatever precision the platform reports. Two writes within one timestamp
/// tick produce equal tokens and count as a single change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModToken(SystemTime);

impl ModToken {
    /// Reads the current token of `path`.
    pub fn of(path: &Path) -> io::Result<Self> {
        let modified = fs::metadata(path)?.modified()?;
        Ok(Self(modified))
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        Self(time)
    }

    #[inline]
    pub fn as_system_time(&self) -> SystemTime {
        self.0
    }
}

/// A running poll thread for one document.
struct WatchRegistration {
    index: usize,
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Owns one polling thread per watched document.
pub struct ChangeWatcher {
    interval: Duration,
    registrations: HashMap<PathBuf, WatchRegistration>,
}

impl Default for ChangeWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl ChangeWatcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            registrations: HashMap::new(),
        }
    }

    /// Starts polling every document in `documents`.
    ///
    /// The index passed to `on_change` is the document's position in `documents`.
    /// Documents that are already watched keep their existing thread.
    pub fn start_watching<F>(&mut self, documents: &[Document], on_change: F)
    where
        F: Fn(usize, ModToken) + Send + Sync + 'static,
    {
        let on_change = Arc::new(on_change);

        for (index, doc) in documents.iter().enumerate() {
            if self.registrations.contains_key(doc.path()) {
                continue;
            }

            let path = doc.path().to_path_buf();
            let baseline = ModToken::of(&path).ok().or(doc.modified());
            let (stop_tx, stop_rx) = bounded::<()>(0);
            let interval = self.interval;
            let callback = Arc::clone(&on_change);
            let thread_path = path.clone();

            let spawned = thread::Builder::new()
                .name(format!("mdtail-watch-{index}"))
                .spawn(move || {
                    poll_loop(thread_path, index, baseline, interval, stop_rx, callback)
                });

            match spawned {
                Ok(handle) => {
                    tracing::debug!(index, path = %path.display(), "watch started");
                    self.registrations.insert(
                        path,
                        WatchRegistration {
                            index,
                            stop_tx,
                            handle,
                        },
                    );
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "failed to spawn watch thread");
                }
            }
        }
    }

    /// Stops polling the given documents. Unknown documents are ignored.
    pub fn stop_watching(&mut self, documents: &[Document]) {
        for doc in documents {
            if let Some(reg) = self.registrations.remove(doc.path()) {
                shutdown_registration(doc.path(), reg);
            }
        }
    }

    /// Stops every registration.
    pub fn stop_all(&mut self) {
        for (path, reg) in self.registrations.drain() {
            shutdown_registration(&path, reg);
        }
    }

    pub fn is_watching(&self, path: &Path) -> bool {
        self.registrations.contains_key(path)
    }

    pub fn watched_count(&self) -> usize {
        self.registrations.len()
    }
}

impl Drop for ChangeWatcher {
    fn drop(&mut self) {
        self.stop_all();
    }
}

fn shutdown_registration(path: &Path, reg: WatchRegistration) {
    let WatchRegistration {
        index,
        stop_tx,
        handle,
    } = reg;
    drop(stop_tx);
    if handle.join().is_err() {
        tracing::error!(index, path = %path.display(), "watch thread panicked");
    } else {
        tracing::debug!(index, path = %path.display(), "watch stopped");
    }
}

/// Body of a watch thread. Runs until the stop channel is signalled or disconnected.
fn poll_loop<F>(
    path: PathBuf,
    index: usize,
    mut last: Option<ModToken>,
    interval: Duration,
    stop_rx: Receiver<()>,
    on_change: Arc<F>,
) where
    F: Fn(usize, ModToken) + Send + Sync + 'static,
{
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        match poll_once(&path, last) {
            Ok(Some(token)) => {
                last = Some(token);
                on_change(index, token);
            }
            Ok(None) => {}
            Err(e) => {
                // deleted or unreadable: skip this cycle, keep the baseline
                tracing::debug!(index, error = %e, "poll skipped");
            }
        }
    }
}

/// One poll cycle. Returns the new token if it differs from `last`.
pub(crate) fn poll_once(path: &Path, last: Option<ModToken>) -> ViewerResult<Option<ModToken>> {
    let current = ModToken::of(path).map_err(|source| ViewerError::WatchIo {
        path: path.to_path_buf(),
        source,
    })?;

    if last == Some(current) {
        Ok(None)
    } else {
        Ok(Some(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam_channel::unbounded;
    use std::error;
    use std::fs::File;
    use std::time::UNIX_EPOCH;
    use tempfile::tempdir;

    const FAST: Duration = Duration::from_millis(10);
    const WAIT: Duration = Duration::from_secs(2);

    fn set_mtime(path: &Path, secs: u64) -> io::Result<()> {
        let file = File::options().write(true).open(path)?;
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs))
    }

    fn docs(paths: &[PathBuf]) -> Vec<Document> {
        paths.iter().cloned().map(Document::new).collect()
    }

    #[test]
    fn poll_once_reports_only_differences() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("a.md");
        fs::write(&file, "one")?;
        set_mtime(&file, 1_000)?;

        let first = poll_once(&file, None)?.ok_or("missing first token")?;
        assert_eq!(poll_once(&file, Some(first))?, None);

        set_mtime(&file, 2_000)?;
        let second = poll_once(&file, Some(first))?;
        assert!(second.is_some_and(|t| t > first));
        Ok(())
    }

    #[test]
    fn poll_once_on_missing_file_is_watch_io() {
        let res = poll_once(Path::new("/definitely/not/here.md"), None);
        assert!(matches!(res, Err(ViewerError::WatchIo { .. })));
    }

    #[test]
    fn change_fires_once_per_modification() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "a")?;
        fs::write(&b, "b")?;
        set_mtime(&a, 1_000)?;
        set_mtime(&b, 1_000)?;

        let (tx, rx) = unbounded();
        let mut watcher = ChangeWatcher::new(FAST);
        watcher.start_watching(&docs(&[a.clone(), b.clone()]), move |idx, tok| {
            let _ = tx.send((idx, tok));
        });
        assert_eq!(watcher.watched_count(), 2);

        // let the threads take their baseline
        thread::sleep(FAST * 5);
        set_mtime(&b, 2_000)?;

        let (idx, tok) = rx.recv_timeout(WAIT)?;
        assert_eq!(idx, 1);
        assert_eq!(tok.as_system_time(), UNIX_EPOCH + Duration::from_secs(2_000));

        assert!(
            rx.recv_timeout(FAST * 10).is_err(),
            "unchanged polls must not fire again"
        );
        Ok(())
    }

    #[test]
    fn deleted_file_does_not_stop_other_documents() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "a")?;
        fs::write(&b, "b")?;
        set_mtime(&a, 1_000)?;
        set_mtime(&b, 1_000)?;

        let (tx, rx) = unbounded();
        let mut watcher = ChangeWatcher::new(FAST);
        watcher.start_watching(&docs(&[a.clone(), b.clone()]), move |idx, _| {
            let _ = tx.send(idx);
        });
        thread::sleep(FAST * 5);

        fs::remove_file(&a)?;
        thread::sleep(FAST * 5);
        set_mtime(&b, 3_000)?;
        assert_eq!(rx.recv_timeout(WAIT)?, 1);

        // recreated with a new timestamp fires for the original index
        fs::write(&a, "back")?;
        set_mtime(&a, 4_000)?;
        assert_eq!(rx.recv_timeout(WAIT)?, 0);
        Ok(())
    }

    #[test]
    fn stop_watching_silences_and_is_idempotent() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let a = dir.path().join("a.md");
        fs::write(&a, "a")?;
        set_mtime(&a, 1_000)?;
        let documents = docs(std::slice::from_ref(&a));

        let (tx, rx) = unbounded();
        let mut watcher = ChangeWatcher::new(FAST);
        watcher.start_watching(&documents, move |idx, _| {
            let _ = tx.send(idx);
        });
        assert!(watcher.is_watching(&a));

        watcher.stop_watching(&documents);
        assert!(!watcher.is_watching(&a));
        watcher.stop_watching(&documents);
        watcher.stop_watching(&docs(&[dir.path().join("never.md")]));

        set_mtime(&a, 5_000)?;
        assert!(rx.recv_timeout(FAST * 10).is_err());
        Ok(())
    }

    #[test]
    fn stop_returns_without_waiting_for_interval() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let a = dir.path().join("a.md");
        fs::write(&a, "a")?;

        let mut watcher = ChangeWatcher::new(Duration::from_secs(60));
        watcher.start_watching(&docs(&[a]), |_, _| {});

        let started = std::time::Instant::now();
        watcher.stop_all();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(watcher.watched_count(), 0);
        Ok(())
    }
}
