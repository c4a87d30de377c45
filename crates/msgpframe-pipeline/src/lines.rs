use std::io::{BufRead, ErrorKind};

/// Splits a buffered stream on `\n`, reusing one buffer for every line.
///
/// A final line without a terminating newline is still returned. An empty
/// read at end-of-stream ends iteration without producing a line.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    line: u64,
    bytes_read: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, 0)
    }

    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(capacity),
            line: 0,
            bytes_read: 0,
        }
    }

    /// Read the next line, terminator included.
    ///
    /// Returns the 1-based line number alongside the bytes, or `None` at
    /// end-of-stream.
    pub fn next_line(&mut self) -> std::io::Result<Option<(u64, &[u8])>> {
        self.buf.clear();
        let read = loop {
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };

        if read == 0 {
            return Ok(None);
        }

        self.line += 1;
        self.bytes_read += read as u64;
        Ok(Some((self.line, self.buf.as_slice())))
    }

    /// Lines returned so far.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Bytes consumed so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
