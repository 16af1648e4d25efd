//! Test utilities for creating, growing, rotating and removing temporary log files,
//! and for recording what a tail session reports.

#[cfg(test)]
use crate::error::Error;
#[cfg(test)]
use crate::listener::TailerListener;
#[cfg(test)]
use crate::tailer::TailerHandle;

#[cfg(test)]
use std::fs::{File, OpenOptions};
#[cfg(test)]
use std::io::Write;
#[cfg(test)]
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
pub struct TempLogFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

#[cfg(test)]
impl TempLogFile {
    /// Create a new empty temporary log file
    pub fn new() -> std::io::Result<Self> {
        let temp_file = Self::missing()?;
        File::create(&temp_file.path)?;
        Ok(temp_file)
    }

    /// Reserve a path in a temporary directory without creating the file
    pub fn missing() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file with initial raw content
    pub fn with_content(content: &str) -> std::io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append_content(content)?;
        Ok(temp_file)
    }

    /// Append raw content, without adding a terminator
    pub fn append_content(&self, content: &str) -> std::io::Result<()> {
        self.append_bytes(content.as_bytes())
    }

    /// Append raw bytes
    pub fn append_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }

    /// Append a line followed by `\n`
    pub fn append_line(&self, line: &str) -> std::io::Result<()> {
        self.append_content(&format!("{}\n", line))
    }

    /// Truncate the file to zero length in place (simulate log rotation)
    pub fn truncate(&self) -> std::io::Result<()> {
        OpenOptions::new().write(true).open(&self.path)?.set_len(0)?;
        Ok(())
    }

    /// Delete the file
    pub fn remove(&self) -> std::io::Result<()> {
        std::fs::remove_file(&self.path)
    }

    /// Get the path to the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One listener callback, as seen by [`RecordingListener`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Init,
    Line(String),
    NotFound,
    Rotated,
    Error(String),
    Stop,
}

/// Listener that records every callback; clones share the same log
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<Recorded>>>,
}

#[cfg(test)]
impl RecordingListener {
    fn record(&self, event: Recorded) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Recorded) -> usize {
        self.events().iter().filter(|event| *event == wanted).count()
    }
}

#[cfg(test)]
impl TailerListener for RecordingListener {
    fn on_init(&mut self, _handle: &TailerHandle) {
        self.record(Recorded::Init);
    }

    fn on_line(&mut self, line: String) {
        self.record(Recorded::Line(line));
    }

    fn on_file_not_found(&mut self) {
        self.record(Recorded::NotFound);
    }

    fn on_file_rotated(&mut self) {
        self.record(Recorded::Rotated);
    }

    fn on_error(&mut self, error: Error) {
        self.record(Recorded::Error(error.to_string()));
    }

    fn on_stop(&mut self) {
        self.record(Recorded::Stop);
    }
}

/// Poll the recorded events until `condition` holds or `timeout` passes
#[cfg(test)]
pub async fn wait_until<F>(listener: &RecordingListener, timeout: Duration, condition: F) -> bool
where
    F: Fn(&[Recorded]) -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition(listener.events().as_slice()) {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[tokio::test]
    async fn test_missing_temp_log_file() {
        let temp_file = TempLogFile::missing().unwrap();
        assert!(!temp_file.path().exists());
    }

    #[tokio::test]
    async fn test_temp_log_file_with_content() {
        let temp_file = TempLogFile::with_content("test line").unwrap();

        let file_content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(file_content, "test line");
    }

    #[tokio::test]
    async fn test_append_line() {
        let temp_file = TempLogFile::new().unwrap();
        temp_file.append_line("line 1").unwrap();
        temp_file.append_line("line 2").unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "line 1\nline 2\n");
    }

    #[tokio::test]
    async fn test_truncate() {
        let temp_file = TempLogFile::with_content("initial content").unwrap();
        temp_file.truncate().unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_append_recreates() {
        let temp_file = TempLogFile::with_content("old").unwrap();
        temp_file.remove().unwrap();
        assert!(!temp_file.path().exists());

        temp_file.append_line("new").unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "new\n");
    }

    #[test]
    fn test_recording_listener_shares_events_between_clones() {
        let listener = RecordingListener::default();
        let mut clone = listener.clone();

        clone.on_line("hello".to_string());
        clone.on_file_rotated();
        clone.on_stop();

        assert_eq!(
            listener.events(),
            vec![
                Recorded::Line("hello".to_string()),
                Recorded::Rotated,
                Recorded::Stop
            ]
        );
        assert_eq!(listener.lines(), vec!["hello"]);
        assert_eq!(listener.count(&Recorded::Stop), 1);
    }
}
