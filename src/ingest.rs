use thiserror::Error;
use tracing::debug;

/// Marker a transport appends once a script is complete.
pub const END_MARKER: &[u8] = b"EOF";
/// Default upper bound on a buffered script.
pub const DEFAULT_BUFFER_LIMIT: usize = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("Script exceeds the buffer limit of {limit} bytes.")]
    BufferOverflow {
        /// The configured limit.
        limit: usize,
    },
}

/// Collects script bytes until the `EOF` marker arrives.
///
/// Bytes may arrive in chunks of any size, and the marker may itself be split
/// across chunks. Whitespace after the marker is ignored.
///
/// # Example
/// ```
/// use padscript::ingest::ScriptReceiver;
///
/// let mut receiver = ScriptReceiver::default();
/// assert_eq!(receiver.push(b"print(1);\nE").unwrap(), None);
/// assert_eq!(receiver.push(b"OF\n").unwrap(), Some(b"print(1);\n".to_vec()));
/// ```
#[derive(Debug, Clone)]
pub struct ScriptReceiver {
    buffer: Vec<u8>,
    limit:  usize,
}

impl Default for ScriptReceiver {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_LIMIT)
    }
}

impl ScriptReceiver {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { buffer: Vec::new(),
               limit }
    }

    /// Appends a chunk.
    ///
    /// # Returns
    /// The complete script without its marker once the marker was seen, and
    /// the receiver is empty again. `None` while the script is incomplete.
    ///
    /// # Errors
    /// `BufferOverflow` if the buffered bytes would exceed the limit. The
    /// partial script is discarded.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Option<Vec<u8>>, IngestError> {
        if self.buffer.len() + chunk.len() > self.limit {
            self.buffer.clear();
            return Err(IngestError::BufferOverflow { limit: self.limit });
        }
        self.buffer.extend_from_slice(chunk);

        let content = self.buffer.trim_ascii_end();
        let Some(script) = content.strip_suffix(END_MARKER) else {
            return Ok(None);
        };
        let script = script.to_vec();
        self.buffer.clear();

        debug!(bytes = script.len(), "script received");
        Ok(Some(script))
    }

    /// Number of bytes waiting for the marker.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Takes whatever was buffered without a marker, for a transport that
    /// closed mid-script.
    pub fn take_pending(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_the_marker() {
        let mut receiver = ScriptReceiver::default();
        assert_eq!(receiver.push(b"let x = 1;"), Ok(None));
        assert_eq!(receiver.pending(), 10);
        assert_eq!(receiver.push(b" x;EOF"), Ok(Some(b"let x = 1; x;".to_vec())));
        assert_eq!(receiver.pending(), 0);
    }

    #[test]
    fn marker_may_be_split_and_followed_by_whitespace() {
        let mut receiver = ScriptReceiver::default();
        assert_eq!(receiver.push(b"x;E"), Ok(None));
        assert_eq!(receiver.push(b"O"), Ok(None));
        assert_eq!(receiver.push(b"F \r\n"), Ok(Some(b"x;".to_vec())));
    }

    #[test]
    fn empty_script() {
        let mut receiver = ScriptReceiver::default();
        assert_eq!(receiver.push(b"EOF"), Ok(Some(Vec::new())));
    }

    #[test]
    fn overflow_discards_the_partial_script() {
        let mut receiver = ScriptReceiver::new(4);
        assert_eq!(receiver.push(b"abc"), Ok(None));
        assert_eq!(receiver.push(b"de"), Err(IngestError::BufferOverflow { limit: 4 }));
        assert_eq!(receiver.pending(), 0);
        assert_eq!(receiver.push(b"EOF"), Ok(Some(Vec::new())));
    }
}
