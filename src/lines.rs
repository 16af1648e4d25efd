//! Splitting raw byte chunks into lines across read boundaries.

/// Carries the unterminated tail of previous chunks and emits completed lines.
///
/// Only `\n` and `\r\n` end a line. A `\r` that is followed by anything else
/// stays in the line as content; a run of `\r` counts once, and a `\r` still
/// pending when a chunk ends is dropped. Bytes are widened to `char` one to
/// one, so content is treated as Latin-1 rather than decoded as UTF-8.
#[derive(Debug, Default)]
pub(crate) struct LineExtractor {
    remainder: String,
}

impl LineExtractor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` to the remainder and calls `emit` for every line it completes.
    pub(crate) fn extract<F>(&mut self, chunk: &[u8], mut emit: F)
    where
        F: FnMut(String),
    {
        if chunk.is_empty() {
            return;
        }

        let mut line = std::mem::take(&mut self.remainder);
        let mut seen_cr = false;

        for &byte in chunk {
            match byte {
                b'\n' => {
                    seen_cr = false;
                    emit(std::mem::take(&mut line));
                }
                b'\r' => seen_cr = true,
                _ => {
                    if seen_cr {
                        line.push('\r');
                        seen_cr = false;
                    }
                    line.push(char::from(byte));
                }
            }
        }

        self.remainder = line;
    }

    /// Drops any partial line, e.g. after the file was rotated.
    pub(crate) fn clear(&mut self) {
        self.remainder.clear();
    }

    #[cfg(test)]
    pub(crate) fn remainder(&self) -> &str {
        &self.remainder
    }
}
