use std::fmt;
use std::str::FromStr;

use super::error::BasencError;

/// One concrete text encoding. Fixed for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    Base64,
    Base64Url,
    Base32,
    Base32Hex,
    Base16,
    Base2Msbf,
    Base2Lsbf,
    Z85,
}

impl Scheme {
    /// Every scheme, in the order `--help` lists them.
    pub const ALL: [Scheme; 8] = [
        Scheme::Base64,
        Scheme::Base64Url,
        Scheme::Base32,
        Scheme::Base32Hex,
        Scheme::Base16,
        Scheme::Base2Msbf,
        Scheme::Base2Lsbf,
        Scheme::Z85,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Base64 => "base64",
            Scheme::Base64Url => "base64url",
            Scheme::Base32 => "base32",
            Scheme::Base32Hex => "base32hex",
            Scheme::Base16 => "base16",
            Scheme::Base2Msbf => "base2msbf",
            Scheme::Base2Lsbf => "base2lsbf",
            Scheme::Z85 => "z85",
        }
    }

    /// Bytes consumed by one encode group.
    #[inline]
    pub const fn input_group(self) -> usize {
        match self {
            Scheme::Base64 | Scheme::Base64Url => 3,
            Scheme::Base32 | Scheme::Base32Hex => 5,
            Scheme::Base16 | Scheme::Base2Msbf | Scheme::Base2Lsbf => 1,
            Scheme::Z85 => 4,
        }
    }

    /// Symbols produced by one encode group.
    #[inline]
    pub const fn output_group(self) -> usize {
        match self {
            Scheme::Base64 | Scheme::Base64Url => 4,
            Scheme::Base32 | Scheme::Base32Hex => 8,
            Scheme::Base16 => 2,
            Scheme::Base2Msbf | Scheme::Base2Lsbf => 8,
            Scheme::Z85 => 5,
        }
    }

    /// Whether a short final group is filled out with `=`.
    #[inline]
    pub const fn uses_padding(self) -> bool {
        matches!(
            self,
            Scheme::Base64 | Scheme::Base64Url | Scheme::Base32 | Scheme::Base32Hex
        )
    }

    /// Exact number of symbols `n` input bytes encode to.
    /// For z85 the caller must already have checked `n % 4 == 0`.
    pub const fn encoded_len(self, n: usize) -> usize {
        let groups = if self.uses_padding() {
            n.div_ceil(self.input_group())
        } else {
            n / self.input_group()
        };
        groups * self.output_group()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = BasencError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scheme = match s.trim_start_matches("--") {
            "base64" => Scheme::Base64,
            "base64url" => Scheme::Base64Url,
            "base32" => Scheme::Base32,
            "base32hex" => Scheme::Base32Hex,
            "base16" => Scheme::Base16,
            "base2msbf" | "base2-msb-first" => Scheme::Base2Msbf,
            "base2lsbf" | "base2-lsb-first" => Scheme::Base2Lsbf,
            "z85" => Scheme::Z85,
            other => return Err(BasencError::UnsupportedScheme(other.to_string())),
        };
        Ok(scheme)
    }
}
