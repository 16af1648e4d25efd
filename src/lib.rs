//! A library that follows a growing file the way `tail -f` does.
//!
//! A [`Tailer`] polls a file at a fixed delay, reads whatever was appended
//! through a reusable buffer, and hands every completed line to a
//! [`TailerListener`]. Partial lines are carried over between reads, and a
//! file that shrinks below the read position is treated as rotated and
//! reopened from the start.
//!
//! # Example
//!
//! ```rust,no_run
//! use file_tailer::{Tailer, TailerConfig, TailerListener};
//! use std::time::Duration;
//!
//! struct Printer;
//!
//! impl TailerListener for Printer {
//!     fn on_line(&mut self, line: String) {
//!         println!("{}", line);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TailerConfig::new("app.log").with_delay(Duration::from_millis(250));
//!     let (handle, task) = Tailer::new(config, Printer)?.spawn();
//!
//!     tokio::time::sleep(Duration::from_secs(10)).await;
//!     handle.stop();
//!     task.await?;
//!
//!     Ok(())
//! }
//! ```

// Internal modules - not part of public API
mod config;
mod error;
mod lines;
mod listener;
mod reader;
mod stream;
mod tailer;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_DELAY, StartMode, TailerConfig};
pub use error::{Error, Result};
pub use listener::{FnListener, TailerListener};
pub use stream::{TailEvent, TailStream};
pub use tailer::{Tailer, TailerHandle};

use std::path::Path;
use tokio_stream::Stream;

/// Creates a stream of lines from a file, starting at its beginning and
/// polling with the default delay.
///
/// # Arguments
///
/// * `path` - File path to follow
///
/// # Example
///
/// ```rust,no_run
/// use file_tailer::tail_file;
/// use tokio_stream::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut lines = tail_file("app.log").await?;
///
///     while let Some(line) = lines.next().await {
///         println!("New line: {}", line?);
///     }
///
///     Ok(())
/// }
/// ```
pub async fn tail_file<P: AsRef<Path>>(path: P) -> Result<impl Stream<Item = Result<String>>> {
    let stream = TailStream::new(TailerConfig::new(path)).await?;
    Ok(stream.lines())
}
