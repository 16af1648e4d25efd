//! Session configuration.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delay between polls when none is given.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Capacity of the read buffer when none is given.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Where a session starts reading once the file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    /// Deliver everything already in the file.
    #[default]
    Beginning,
    /// Skip existing content and deliver only what is appended later.
    End,
}

/// Configuration for a single tail session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailerConfig {
    path: PathBuf,
    delay: Duration,
    start_mode: StartMode,
    buffer_size: usize,
}

impl TailerConfig {
    /// Creates a configuration for `path` with the default delay, start mode and buffer size.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delay: DEFAULT_DELAY,
            start_mode: StartMode::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_start_mode(mut self, start_mode: StartMode) -> Self {
        self.start_mode = start_mode;
        self
    }

    /// Shorthand for `with_start_mode(StartMode::End)`.
    pub fn from_end(self) -> Self {
        self.with_start_mode(StartMode::End)
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn start_mode(&self) -> StartMode {
        self.start_mode
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Checks that the delay and buffer size are usable.
    pub fn validate(&self) -> Result<()> {
        if self.delay.is_zero() {
            return Err(Error::InvalidConfig {
                message: "delay must be greater than zero".to_string(),
            });
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidConfig {
                message: "buffer size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
