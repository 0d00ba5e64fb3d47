//! In-memory ring buffer appender
//!
//! Keeps the most recent `capacity` bytes of rendered output. Older bytes are
//! overwritten as the write cursor wraps around, so the buffer always holds
//! the tail of the log, oldest byte first when printed.

use crate::core::layout::{render, Layout};
use crate::core::{Appender, LogEvent, LoggerError, Result};
use std::io::Write;

pub struct RingBufferAppender {
    buffer: Box<[u8]>,
    /// Next byte to be written; the oldest byte once the buffer is full.
    cursor: usize,
    used: usize,
    separator: Vec<u8>,
    scratch: Vec<u8>,
}

impl RingBufferAppender {
    /// Create a ring buffer holding `capacity` bytes, separating events with `\n`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            cursor: 0,
            used: 0,
            separator: b"\n".to_vec(),
            scratch: Vec::new(),
        }
    }

    /// Bytes written between two consecutive events.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<Vec<u8>>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of readable bytes, at most [`capacity`](Self::capacity).
    pub fn used_len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Append raw bytes, overwriting the oldest ones when full.
    pub fn write_bytes(&mut self, mut bytes: &[u8]) {
        let capacity = self.buffer.len();
        self.used = (self.used + bytes.len()).min(capacity);

        // only the last `capacity` bytes can survive
        if bytes.len() > capacity {
            let skip = bytes.len() - capacity;
            self.cursor = (self.cursor + skip) % capacity;
            bytes = &bytes[skip..];
        }

        while !bytes.is_empty() {
            let run = bytes.len().min(capacity - self.cursor);
            self.buffer[self.cursor..self.cursor + run].copy_from_slice(&bytes[..run]);
            self.cursor = (self.cursor + run) % capacity;
            bytes = &bytes[run..];
        }
    }

    /// Write the retained bytes to `out`, oldest first.
    pub fn print(&self, out: &mut impl Write) -> Result<()> {
        let (head, tail) = self.slices();
        out.write_all(head)
            .and_then(|_| out.write_all(tail))
            .map_err(|e| LoggerError::io_operation("printing ring buffer", "cannot write output", e))
    }

    /// The retained bytes, oldest first.
    pub fn contents(&self) -> Vec<u8> {
        let (head, tail) = self.slices();
        [head, tail].concat()
    }

    /// Forget everything written so far. The stale bytes stay in memory but
    /// can no longer be read.
    pub fn clear(&mut self) {
        self.used = 0;
        self.cursor = 0;
    }

    fn slices(&self) -> (&[u8], &[u8]) {
        if self.used < self.buffer.len() {
            (&self.buffer[..self.used], &[][..])
        } else {
            let (older, newer) = self.buffer.split_at(self.cursor);
            (newer, older)
        }
    }
}

impl Appender for RingBufferAppender {
    fn append(&mut self, event: &LogEvent<'_>, layout: Option<&dyn Layout>) -> Result<()> {
        let mut rendered = std::mem::take(&mut self.scratch);
        rendered.clear();
        let result = render(event, layout, &mut rendered);
        if result.is_ok() {
            if !self.is_empty() {
                let separator = std::mem::take(&mut self.separator);
                self.write_bytes(&separator);
                self.separator = separator;
            }
            self.write_bytes(&rendered);
        }
        self.scratch = rendered;
        result
    }

    fn name(&self) -> &str {
        "ring_buffer"
    }
}
