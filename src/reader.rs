//! File reading utilities for the poll loop.

use crate::error::Result;
use crate::lines::LineExtractor;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// How the file length compares to the read position at the start of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthChange {
    /// Shorter than the position: truncated or replaced.
    Rotated,
    /// Longer than the position: there is something to read.
    Grew,
    Unchanged,
}

/// Classify the current size against the last delivered position
pub(crate) fn classify_length(current_size: u64, last_position: u64) -> LengthChange {
    if current_size < last_position {
        LengthChange::Rotated
    } else if current_size > last_position {
        LengthChange::Grew
    } else {
        LengthChange::Unchanged
    }
}

/// Current length of the file at `path`; a missing file counts as empty.
pub(crate) async fn current_length(path: &Path) -> Result<u64> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.len()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Open `path` for reading, returning `None` when it does not exist.
pub(crate) async fn open_if_exists(path: &Path) -> Result<Option<File>> {
    match File::open(path).await {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read everything currently available, feeding each chunk to the extractor.
///
/// Reads continue while they fill the whole buffer; the first short read ends
/// the pass. Returns the stream offset after the last byte consumed.
pub(crate) async fn read_available<R, F>(
    reader: &mut R,
    buffer: &mut [u8],
    extractor: &mut LineExtractor,
    mut on_line: F,
) -> Result<u64>
where
    R: AsyncRead + AsyncSeek + Unpin,
    F: FnMut(String),
{
    loop {
        let read = reader.read(buffer).await?;
        extractor.extract(&buffer[..read], &mut on_line);
        if read < buffer.len() {
            break;
        }
    }

    Ok(reader.stream_position().await?)
}
