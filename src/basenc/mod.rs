pub mod alphabet;
pub mod codec;
mod error;
mod scheme;
mod stream;
mod wrap;


use std::io::{Read, Write};

pub use self::error::{BasencError, Result};
pub use self::scheme::Scheme;
pub use self::stream::{
    DECODE_BLOCK, Decoder, ENCODE_BLOCK, StreamStats, decode_stream, encode_stream,
};
pub use self::wrap::WrapWriter;

/// Line width used when the caller does not pick one.
pub const DEFAULT_WRAP: usize = 76;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// Everything one run needs besides its input and output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub scheme: Scheme,
    pub direction: Direction,
    /// Encode only. 0 disables wrapping.
    pub wrap: usize,
    /// Decode only.
    pub ignore_garbage: bool,
}

impl Config {
    pub fn encode(scheme: Scheme) -> Self {
        Config {
            scheme,
            direction: Direction::Encode,
            wrap: DEFAULT_WRAP,
            ignore_garbage: false,
        }
    }

    pub fn decode(scheme: Scheme) -> Self {
        Config {
            direction: Direction::Decode,
            ..Config::encode(scheme)
        }
    }

    pub fn with_wrap(mut self, wrap: usize) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_ignore_garbage(mut self, ignore_garbage: bool) -> Self {
        self.ignore_garbage = ignore_garbage;
        self
    }
}

/// Run one encode or decode pass from `reader` to `writer`.
pub fn run<R: Read, W: Write>(config: &Config, reader: &mut R, writer: &mut W) -> Result<StreamStats> {
    match config.direction {
        Direction::Encode => encode_stream(reader, writer, config.scheme, config.wrap),
        Direction::Decode => decode_stream(reader, writer, config.scheme, config.ignore_garbage),
    }
}
