//! One-line lookahead over a buffered line source.
//!
//! The scan loop needs to branch on the next line's prefix before deciding
//! how much to consume, so the reader is wrapped with a single-line peek
//! buffer. Lines keep their trailing newline so they can be reproduced
//! byte-for-byte.

use std::io::{self, BufRead};

/// Wraps a `BufRead` and allows peeking at the next line without consuming it.
pub struct PeekLines<R> {
    reader: R,
    peeked: Option<String>,
}

impl<R: BufRead> PeekLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
        }
    }

    /// Returns the next line without consuming it.
    /// Repeated peeks return the same line. `None` signals end of input.
    pub fn peek(&mut self) -> io::Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read_raw()?;
        }
        Ok(self.peeked.as_deref())
    }

    /// Returns and consumes the next line.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        self.read_raw()
    }

    fn read_raw(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let n = self.reader.read_line(&mut buf)?;
        Ok(if n == 0 { None } else { Some(buf) })
    }
}
