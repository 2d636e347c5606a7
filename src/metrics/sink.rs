use std::sync::RwLock;

use crate::error::SinkError;

/// Append-only in-memory log shared by all workers.
///
/// Each append copies the whole payload under the write lock, so a reader
/// never sees part of a write.
#[derive(Debug, Default)]
pub struct LogSink {
    buffer: RwLock<Vec<u8>>,
}

impl LogSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`SinkError::LockPoisoned`] if a previous writer panicked.
    pub fn append(&self, bytes: &[u8]) -> Result<(), SinkError> {
        let mut buffer = self.buffer.write().map_err(|err| {
            tracing::error!("Log sink lock poisoned: {}", err);
            SinkError::LockPoisoned
        })?;
        buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends `line` and a trailing newline as one write.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::LockPoisoned`] if a previous writer panicked.
    pub fn append_line(&self, line: &str) -> Result<(), SinkError> {
        let mut buffer = self.buffer.write().map_err(|err| {
            tracing::error!("Log sink lock poisoned: {}", err);
            SinkError::LockPoisoned
        })?;
        buffer.reserve(line.len().saturating_add(1));
        buffer.extend_from_slice(line.as_bytes());
        buffer.push(b'\n');
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SinkError::LockPoisoned`] if a previous writer panicked.
    pub fn snapshot(&self) -> Result<Vec<u8>, SinkError> {
        let buffer = self.buffer.read().map_err(|err| {
            tracing::error!("Log sink lock poisoned: {}", err);
            SinkError::LockPoisoned
        })?;
        Ok(buffer.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.read().map_or(0, |buffer| buffer.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
