use std::io;

use thiserror::Error;

/// Every way an encode or decode run can fail. All of them end the run.
#[derive(Debug, Error)]
pub enum BasencError {
    /// Reading the encoded or raw input failed.
    #[error("read error: {}", crate::common::io_error_msg(.0))]
    SourceRead(#[source] io::Error),

    /// Writing to the output failed.
    #[error("write error: {}", crate::common::io_error_msg(.0))]
    SinkWrite(#[source] io::Error),

    /// A byte outside the alphabet (and not a line break) while decoding
    /// without ignore-garbage, or a data symbol following `=` in a group.
    #[error("invalid input")]
    InvalidInputSymbol { byte: u8, offset: u64 },

    /// A scheme-specific multiple-of-N rule was broken.
    #[error("invalid input ({0})")]
    MisalignedLength(&'static str),

    /// A z85 group decoded to a value that does not fit in 32 bits.
    /// `index` counts significant symbols, not raw bytes.
    #[error("invalid input (z85 group out of range)")]
    Overflow { index: u64 },

    #[error("unsupported encoding: '{0}'")]
    UnsupportedScheme(String),
}

impl BasencError {
    /// True when the reader of our output went away (EPIPE).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, BasencError::SinkWrite(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

pub type Result<T> = std::result::Result<T, BasencError>;
