//! Stream implementation over a tail session running in the background.

use crate::config::TailerConfig;
use crate::error::{Error, Result};
use crate::listener::TailerListener;
use crate::tailer::{Tailer, TailerHandle};
use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

/// Everything a tail session reports, in the order it happened.
#[derive(Debug)]
pub enum TailEvent {
    /// A completed line, terminator stripped.
    Line(String),
    /// The file does not exist; the session keeps retrying.
    FileNotFound,
    /// The file shrank and was reopened from the start.
    FileRotated,
    /// A position error, or the fatal error that ended the session.
    Error(Error),
    /// The session has exited. Always the last event.
    Stopped,
}

/// Listener that forwards every callback into a channel.
struct ChannelListener {
    tx: mpsc::UnboundedSender<TailEvent>,
}

impl ChannelListener {
    fn send(&self, event: TailEvent) {
        // The receiver is gone only after the stream was dropped, which also stops the session.
        let _ = self.tx.send(event);
    }
}

impl TailerListener for ChannelListener {
    fn on_line(&mut self, line: String) {
        self.send(TailEvent::Line(line));
    }

    fn on_file_not_found(&mut self) {
        self.send(TailEvent::FileNotFound);
    }

    fn on_file_rotated(&mut self) {
        self.send(TailEvent::FileRotated);
    }

    fn on_error(&mut self, error: Error) {
        self.send(TailEvent::Error(error));
    }

    fn on_stop(&mut self) {
        self.send(TailEvent::Stopped);
    }
}

/// A stream of [`TailEvent`]s from a file followed in the background.
///
/// Dropping the stream stops the session.
pub struct TailStream {
    receiver: mpsc::UnboundedReceiver<TailEvent>,
    handle: TailerHandle,
    path: PathBuf,
    _task_handle: JoinHandle<()>,
}

impl TailStream {
    /// Starts following the file described by `config` on a new tokio task.
    pub async fn new(config: TailerConfig) -> Result<Self> {
        let path = config.path().to_path_buf();
        let (tx, rx) = mpsc::unbounded_channel();

        let tailer = Tailer::new(config, ChannelListener { tx })?;
        let (handle, task_handle) = tailer.spawn();

        Ok(TailStream {
            receiver: rx,
            handle,
            path,
            _task_handle: task_handle,
        })
    }

    /// Handle for stopping the session without dropping the stream.
    pub fn handle(&self) -> TailerHandle {
        self.handle.clone()
    }

    /// Requests the session to stop; the stream ends after [`TailEvent::Stopped`].
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Narrows the stream to lines and errors.
    ///
    /// Rotations are dropped. A missing file shows up as
    /// [`Error::FileNotFound`] on every retry without ending the stream.
    pub fn lines(self) -> impl Stream<Item = Result<String>> {
        let path = self.path.display().to_string();
        self.filter_map(move |event| match event {
            TailEvent::Line(line) => Some(Ok(line)),
            TailEvent::FileNotFound => Some(Err(Error::FileNotFound { path: path.clone() })),
            TailEvent::Error(e) => Some(Err(e)),
            TailEvent::FileRotated | TailEvent::Stopped => None,
        })
    }

    /// Check if the stream has been closed/dropped
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for TailStream {
    fn drop(&mut self) {
        self.handle.stop();
    }
}

impl Stream for TailStream {
    type Item = TailEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}
