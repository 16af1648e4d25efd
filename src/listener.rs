//! Callbacks a tail session delivers its events to.

use crate::error::Error;
use crate::tailer::TailerHandle;

/// Receives events from a running [`Tailer`](crate::Tailer).
///
/// All methods run inline on the session's task, so a slow implementation
/// delays the next poll. Every method has a no-op default; implement only
/// what you need.
pub trait TailerListener: Send {
    /// Called once when the session is constructed, before polling begins.
    ///
    /// The handle can be kept to stop the session from elsewhere.
    fn on_init(&mut self, _handle: &TailerHandle) {}

    /// Called for each completed line, with the terminator stripped.
    fn on_line(&mut self, _line: String) {}

    /// Called every time the file could not be opened because it does not exist.
    fn on_file_not_found(&mut self) {}

    /// Called when the file shrank below the read position.
    fn on_file_rotated(&mut self) {}

    /// Called for position errors and for the fatal error that ends the session.
    fn on_error(&mut self, _error: Error) {}

    /// Called exactly once, after the poll loop has exited.
    fn on_stop(&mut self) {}
}

/// Adapts a closure into a listener that only cares about lines.
pub struct FnListener<F>(F);

impl<F> FnListener<F>
where
    F: FnMut(String) + Send,
{
    pub fn new(on_line: F) -> Self {
        Self(on_line)
    }
}

impl<F> TailerListener for FnListener<F>
where
    F: FnMut(String) + Send,
{
    fn on_line(&mut self, line: String) {
        (self.0)(line)
    }
}
