use std::io::Write;

use super::error::{BasencError, Result};

/// Folds encoded symbols into lines of `width` symbols.
///
/// `column` counts symbols since the last line break and is always
/// `< width` between calls. Width 0 disables wrapping.
pub struct WrapWriter<W: Write> {
    inner: W,
    width: usize,
    column: usize,
    buf: Vec<u8>,
    written: u64,
}

impl<W: Write> WrapWriter<W> {
    pub fn new(inner: W, width: usize) -> Self {
        WrapWriter {
            inner,
            width,
            column: 0,
            buf: Vec::new(),
            written: 0,
        }
    }

    /// Current column (symbols since the last line break).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Bytes handed to the sink so far, line breaks included.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Write `symbols`, breaking the line each time the column reaches the
    /// wrap width. The batch goes out in a single `write_all`.
    pub fn emit(&mut self, symbols: &[u8]) -> Result<()> {
        if symbols.is_empty() {
            return Ok(());
        }
        if self.width == 0 {
            return self.write(symbols);
        }

        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        buf.reserve(symbols.len() + symbols.len() / self.width + 1);

        let mut rp = 0;
        while rp < symbols.len() {
            let space = self.width - self.column;
            let take = space.min(symbols.len() - rp);
            buf.extend_from_slice(&symbols[rp..rp + take]);
            rp += take;
            self.column += take;
            if self.column == self.width {
                buf.push(b'\n');
                self.column = 0;
            }
        }

        let result = self.write(&buf);
        self.buf = buf;
        result
    }

    /// End the run: terminate a partial last line, then flush.
    pub fn finish(mut self) -> Result<u64> {
        if self.width > 0 && self.column > 0 {
            self.write(b"\n")?;
            self.column = 0;
        }
        self.inner.flush().map_err(BasencError::SinkWrite)?;
        Ok(self.written)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(BasencError::SinkWrite)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}
