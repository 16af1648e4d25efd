//! The poll loop that follows a single file until it is stopped.

use crate::config::{StartMode, TailerConfig};
use crate::error::{Error, Result};
use crate::lines::LineExtractor;
use crate::listener::TailerListener;
use crate::reader::{
    LengthChange, classify_length, current_length, open_if_exists, read_available,
};
use std::io::SeekFrom;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncSeekExt;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

#[derive(Debug)]
struct Shared {
    running: AtomicBool,
    wake: Notify,
}

/// Cloneable control over a [`Tailer`], usable from any thread or task.
#[derive(Debug, Clone)]
pub struct TailerHandle {
    shared: Arc<Shared>,
}

impl TailerHandle {
    fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                running: AtomicBool::new(true),
                wake: Notify::new(),
            }),
        }
    }

    /// Asks the session to stop after its current cycle.
    ///
    /// Returns immediately. A pending sleep is cut short; a read in progress
    /// is allowed to finish.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::Release);
        self.shared.wake.notify_one();
    }

    /// `false` once [`stop`](Self::stop) has been called.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }
}

/// Read position. `Invalidated` forces the next cycle down the rotation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    At(u64),
    Invalidated,
}

/// What the loop does after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Sleep,
    Immediately,
}

/// A single tail session over one file.
///
/// The session is created with [`Tailer::new`], which calls the listener's
/// `on_init`, and then driven by [`Tailer::run`] or [`Tailer::spawn`]. It
/// cannot be restarted once the loop has exited.
pub struct Tailer<L> {
    config: TailerConfig,
    listener: L,
    handle: TailerHandle,
    file: Option<File>,
    cursor: Cursor,
    buffer: Vec<u8>,
    extractor: LineExtractor,
}

impl<L: TailerListener> Tailer<L> {
    /// Creates a session, validating `config` and initialising `listener`.
    pub fn new(config: TailerConfig, mut listener: L) -> Result<Self> {
        config.validate()?;

        let handle = TailerHandle::new();
        listener.on_init(&handle);

        Ok(Self {
            buffer: vec![0u8; config.buffer_size()],
            config,
            listener,
            handle,
            file: None,
            cursor: Cursor::At(0),
            extractor: LineExtractor::new(),
        })
    }

    pub fn handle(&self) -> TailerHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &TailerConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        self.config.path()
    }

    pub fn delay(&self) -> Duration {
        self.config.delay()
    }

    /// Runs the session on a new tokio task.
    pub fn spawn(self) -> (TailerHandle, JoinHandle<()>)
    where
        L: 'static,
    {
        let handle = self.handle();
        let task = tokio::spawn(self.run());
        (handle, task)
    }

    /// Follows the file until stopped or a fatal error occurs.
    ///
    /// Errors never escape: they go to the listener, followed by `on_stop`.
    pub async fn run(mut self) {
        debug!(path = %self.path().display(), "Tailer started");

        if let Err(e) = self.follow().await {
            warn!(path = %self.path().display(), error = %e, "Tailer failed");
            self.listener.on_error(e);
        }

        // Dropping the handle closes it; there is no close error to report.
        self.file = None;

        debug!(path = %self.path().display(), "Tailer stopped");
        self.listener.on_stop();
    }

    async fn follow(&mut self) -> Result<()> {
        while self.handle.is_running() && self.file.is_none() {
            if !self.open().await? {
                pause(self.config.delay(), &self.handle.shared.wake).await;
            }
        }

        while self.handle.is_running() {
            if self.poll_cycle().await? == Next::Sleep {
                pause(self.config.delay(), &self.handle.shared.wake).await;
            }
        }

        Ok(())
    }

    /// First open. Returns `false` if the file does not exist yet.
    async fn open(&mut self) -> Result<bool> {
        let Some(mut file) = open_if_exists(self.config.path()).await? else {
            trace!(path = %self.path().display(), "File not found");
            self.listener.on_file_not_found();
            return Ok(false);
        };

        let position = match self.config.start_mode() {
            StartMode::Beginning => 0,
            StartMode::End => file.metadata().await?.len(),
        };
        file.seek(SeekFrom::Start(position)).await?;

        debug!(path = %self.path().display(), position, "File opened");
        self.file = Some(file);
        self.cursor = Cursor::At(position);
        Ok(true)
    }

    /// One length check followed by a read, a rotation, or nothing.
    async fn poll_cycle(&mut self) -> Result<Next> {
        if self.file.is_none() {
            return self.reopen().await;
        }

        let position = match self.cursor {
            Cursor::At(position) => position,
            Cursor::Invalidated => return self.rotate().await,
        };

        let length = current_length(self.config.path()).await?;
        match classify_length(length, position) {
            LengthChange::Rotated => self.rotate().await,
            LengthChange::Grew => self.read_new_lines(position).await,
            LengthChange::Unchanged => Ok(Next::Sleep),
        }
    }

    async fn rotate(&mut self) -> Result<Next> {
        debug!(path = %self.path().display(), "File rotated");
        self.listener.on_file_rotated();
        self.extractor.clear();
        self.file = None;
        self.reopen().await
    }

    async fn reopen(&mut self) -> Result<Next> {
        match open_if_exists(self.config.path()).await? {
            Some(file) => {
                debug!(path = %self.path().display(), "File reopened");
                self.file = Some(file);
                self.cursor = Cursor::At(0);
                Ok(Next::Immediately)
            }
            None => {
                trace!(path = %self.path().display(), "File not found");
                self.listener.on_file_not_found();
                Ok(Next::Sleep)
            }
        }
    }

    async fn read_new_lines(&mut self, position: u64) -> Result<Next> {
        let Some(file) = self.file.as_mut() else {
            return Ok(Next::Immediately);
        };

        let listener = &mut self.listener;
        let new_position = read_available(file, &mut self.buffer, &mut self.extractor, |line| {
            listener.on_line(line)
        })
        .await?;

        if new_position == position {
            warn!(position, "File grew but read made no progress");
            self.listener.on_error(Error::IllegalPosition { position });
            self.cursor = Cursor::Invalidated;
            return Ok(Next::Immediately);
        }

        trace!(from = position, to = new_position, "Read new content");
        self.cursor = Cursor::At(new_position);
        Ok(Next::Sleep)
    }
}

/// Sleeps for `delay`, or until a stop request wakes us.
async fn pause(delay: Duration, wake: &Notify) {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = wake.notified() => {}
    }
}
