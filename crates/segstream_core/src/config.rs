//! Stream configuration.

/// Default size of the read-ahead and write-behind buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Configuration for a [`crate::SegmentedStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Whether a read that comes up short fails with
    /// [`crate::SegError::EndOfStream`] instead of returning fewer bytes.
    pub strict: bool,

    /// Capacity of the read-ahead cache and of the write-behind buffer
    /// (0 = unbuffered).
    pub buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            strict: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl StreamConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether short reads are errors.
    #[must_use]
    pub const fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Sets the buffer capacity.
    #[must_use]
    pub const fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Disables read-ahead and write-behind buffering.
    #[must_use]
    pub const fn unbuffered(self) -> Self {
        self.buffer_size(0)
    }
}
