use std::io::{Read, Write};

use super::alphabet::{self, PAD};
use super::codec;
use super::error::{BasencError, Result};
use super::scheme::Scheme;
use super::wrap::WrapWriter;
use crate::common::io::read_full;

/// Raw bytes read per encode chunk. A multiple of every scheme's input
/// group, so only the final chunk of a stream can end mid-group.
pub const ENCODE_BLOCK: usize = 60 * 4096;

/// Encoded bytes read per decode chunk. A multiple of every scheme's
/// symbol group.
pub const DECODE_BLOCK: usize = 40 * 4096;

const _: () = {
    let mut i = 0;
    while i < Scheme::ALL.len() {
        assert!(ENCODE_BLOCK % Scheme::ALL[i].input_group() == 0);
        assert!(DECODE_BLOCK % Scheme::ALL[i].output_group() == 0);
        i += 1;
    }
};

/// Progress of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// Encode everything `reader` yields into `writer`, wrapping lines at
/// `wrap` symbols (0 = no wrapping).
pub fn encode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    scheme: Scheme,
    wrap: usize,
) -> Result<StreamStats> {
    let mut buf = vec![0u8; ENCODE_BLOCK];
    let mut encoded = Vec::with_capacity(scheme.encoded_len(ENCODE_BLOCK));
    let mut out = WrapWriter::new(writer, wrap);
    let mut bytes_read = 0u64;

    loop {
        let n = read_full(reader, &mut buf).map_err(BasencError::SourceRead)?;
        if n == 0 {
            break;
        }
        bytes_read += n as u64;

        encoded.clear();
        codec::encode_block(scheme, &buf[..n], &mut encoded)?;
        out.emit(&encoded)?;

        // A short read means end of input.
        if n < buf.len() {
            break;
        }
    }

    let bytes_written = out.finish()?;
    Ok(StreamStats {
        bytes_read,
        bytes_written,
    })
}

/// Decode everything `reader` yields into `writer`.
///
/// Output for each chunk is written before the next read, so a failure
/// leaves everything decoded up to that point in `writer`.
pub fn decode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    scheme: Scheme,
    ignore_garbage: bool,
) -> Result<StreamStats> {
    let mut buf = vec![0u8; DECODE_BLOCK];
    let mut decoded = Vec::with_capacity(DECODE_BLOCK);
    let mut decoder = Decoder::new(scheme, ignore_garbage);
    let mut stats = StreamStats::default();

    loop {
        let n = read_full(reader, &mut buf).map_err(BasencError::SourceRead)?;
        if n == 0 {
            break;
        }
        stats.bytes_read += n as u64;

        decoded.clear();
        let fed = decoder.feed(&buf[..n], &mut decoded);
        write_decoded(writer, &decoded, &mut stats)?;
        fed?;
    }

    decoded.clear();
    let finished = decoder.finish(&mut decoded);
    write_decoded(writer, &decoded, &mut stats)?;
    finished?;

    writer.flush().map_err(BasencError::SinkWrite)?;
    Ok(stats)
}

fn write_decoded<W: Write>(writer: &mut W, data: &[u8], stats: &mut StreamStats) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    writer.write_all(data).map_err(BasencError::SinkWrite)?;
    stats.bytes_written += data.len() as u64;
    Ok(())
}

/// Incremental decoder. Filters line breaks and (optionally) garbage out of
/// each chunk, then hands only whole symbol groups to the block codec; the
/// partial group left over waits for the next chunk or for `finish`.
pub struct Decoder {
    scheme: Scheme,
    ignore_garbage: bool,
    /// Significant symbols not yet decoded. Always starts on a group boundary.
    pending: Vec<u8>,
    /// Index of `pending[0]` among all significant symbols seen.
    pending_index: u64,
    /// Stream offset of the next byte fed in.
    offset: u64,
    /// The group being collected already holds a `=`.
    pad_in_group: bool,
}

impl Decoder {
    pub fn new(scheme: Scheme, ignore_garbage: bool) -> Self {
        Decoder {
            scheme,
            ignore_garbage,
            pending: Vec::new(),
            pending_index: 0,
            offset: 0,
            pad_in_group: false,
        }
    }

    /// Bytes of encoded input consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Consume one chunk of encoded text, appending every byte it completes.
    pub fn feed(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let scanned = self.scan_chunk(chunk);
        let drained = self.drain_whole_groups(out);
        self.offset += chunk.len() as u64;
        // Groups drained here precede whatever the scan tripped on.
        drained?;
        scanned
    }

    /// End of input: decode the final, possibly partial, group.
    pub fn finish(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        codec::decode_block(self.scheme, &pending, true, self.pending_index, out)?;
        self.pending_index += pending.len() as u64;
        Ok(())
    }

    fn scan_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        let mut start = 0;
        for brk in memchr::memchr2_iter(b'\n', b'\r', chunk) {
            self.scan_line(&chunk[start..brk], self.offset + start as u64)?;
            start = brk + 1;
        }
        self.scan_line(&chunk[start..], self.offset + start as u64)
    }

    /// Scan a run of bytes that holds no line breaks.
    fn scan_line(&mut self, line: &[u8], line_offset: u64) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }

        // Fast path: plain alphabet symbols in the middle of the data.
        if !self.pad_in_group
            && line
                .iter()
                .all(|&b| alphabet::value_of(self.scheme, b).is_some())
        {
            self.pending.extend_from_slice(line);
            return Ok(());
        }

        let width = self.scheme.output_group();
        for (i, &b) in line.iter().enumerate() {
            let is_pad = b == PAD && self.scheme.uses_padding();
            if !is_pad && alphabet::value_of(self.scheme, b).is_none() {
                if self.ignore_garbage {
                    continue;
                }
                return Err(BasencError::InvalidInputSymbol {
                    byte: b,
                    offset: line_offset + i as u64,
                });
            }
            if is_pad {
                self.pad_in_group = true;
            } else if self.pad_in_group {
                return Err(BasencError::InvalidInputSymbol {
                    byte: b,
                    offset: line_offset + i as u64,
                });
            }
            self.pending.push(b);
            // A padded group is complete; the next symbol opens a new group.
            if self.pad_in_group && self.pending.len().is_multiple_of(width) {
                self.pad_in_group = false;
            }
        }
        Ok(())
    }

    fn drain_whole_groups(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let width = self.scheme.output_group();
        let whole = self.pending.len() / width * width;
        if whole == 0 {
            return Ok(());
        }
        let result =
            codec::decode_block(self.scheme, &self.pending[..whole], false, self.pending_index, out);
        self.pending.drain(..whole);
        self.pending_index += whole as u64;
        result
    }
}
