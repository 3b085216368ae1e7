//! Block codecs: pure transforms over fully buffered blocks.
//!
//! Encoders take raw bytes and append symbols. Decoders take significant
//! symbols only (no line breaks, no garbage) whose length is a whole number
//! of groups, except for the final block of a stream.

use base64_simd::AsOut;

use super::alphabet::{self, PAD};
use super::error::{BasencError, Result};
use super::scheme::Scheme;

/// SIMD base64 engines (padded). Bit-identical to the scalar tables.
const B64_STANDARD: &base64_simd::Base64 = &base64_simd::STANDARD;
const B64_URL_SAFE: &base64_simd::Base64 = &base64_simd::URL_SAFE;

// ======================== Encode ========================

/// Encode `data` with `scheme`, appending symbols to `out`.
///
/// A short trailing group is padded (base64/base32 families) or, for z85,
/// rejected with `MisalignedLength`.
pub fn encode_block(scheme: Scheme, data: &[u8], out: &mut Vec<u8>) -> Result<()> {
    match scheme {
        Scheme::Base64 => base64_encode_simd(data, B64_STANDARD, out),
        Scheme::Base64Url => base64_encode_simd(data, B64_URL_SAFE, out),
        Scheme::Base32 => base32_encode(data, alphabet::BASE32_ALPHABET, out),
        Scheme::Base32Hex => base32_encode(data, alphabet::BASE32HEX_ALPHABET, out),
        Scheme::Base16 => base16_encode(data, out),
        Scheme::Base2Msbf => base2_encode(data, &BASE2_MSBF_TABLE, out),
        Scheme::Base2Lsbf => base2_encode(data, &BASE2_LSBF_TABLE, out),
        Scheme::Z85 => return z85_encode(data, out),
    }
    Ok(())
}

fn base64_encode_simd(data: &[u8], engine: &base64_simd::Base64, out: &mut Vec<u8>) {
    if data.is_empty() {
        return;
    }
    let start = out.len();
    let len = engine.encoded_length(data.len());
    out.resize(start + len, 0);
    let written = engine.encode(data, out[start..].as_out());
    debug_assert_eq!(written.len(), len);
}

/// Scalar base64 encoder. Branch-free over whole 3-byte groups.
#[cfg(test)]
pub(crate) fn base64_encode(data: &[u8], alphabet: &[u8; 64], out: &mut Vec<u8>) {
    out.reserve(data.len().div_ceil(3) * 4);
    let full_end = (data.len() / 3) * 3;

    for chunk in data[..full_end].chunks_exact(3) {
        let (b0, b1, b2) = (chunk[0], chunk[1], chunk[2]);
        out.extend_from_slice(&[
            alphabet[(b0 >> 2) as usize],
            alphabet[((b0 & 0x03) << 4 | b1 >> 4) as usize],
            alphabet[((b1 & 0x0F) << 2 | b2 >> 6) as usize],
            alphabet[(b2 & 0x3F) as usize],
        ]);
    }

    match data[full_end..] {
        [b0] => out.extend_from_slice(&[
            alphabet[(b0 >> 2) as usize],
            alphabet[((b0 & 0x03) << 4) as usize],
            PAD,
            PAD,
        ]),
        [b0, b1] => out.extend_from_slice(&[
            alphabet[(b0 >> 2) as usize],
            alphabet[((b0 & 0x03) << 4 | b1 >> 4) as usize],
            alphabet[((b1 & 0x0F) << 2) as usize],
            PAD,
        ]),
        _ => {}
    }
}

/// Symbols carrying data in a base32 group, indexed by `n mod 5`.
/// The rest of the 8-symbol group is padding: 1→6 pads, 2→4, 3→3, 4→1.
const BASE32_DATA_SYMBOLS: [usize; 5] = [8, 2, 4, 5, 7];

fn base32_encode(data: &[u8], alphabet: &[u8; 32], out: &mut Vec<u8>) {
    out.reserve(data.len().div_ceil(5) * 8);
    for chunk in data.chunks(5) {
        let mut buf = [0u8; 5];
        buf[..chunk.len()].copy_from_slice(chunk);
        let [b0, b1, b2, b3, b4] = buf;
        let symbols = [
            alphabet[(b0 >> 3) as usize],
            alphabet[((b0 & 0x07) << 2 | b1 >> 6) as usize],
            alphabet[((b1 >> 1) & 0x1F) as usize],
            alphabet[((b1 & 0x01) << 4 | b2 >> 4) as usize],
            alphabet[((b2 & 0x0F) << 1 | b3 >> 7) as usize],
            alphabet[((b3 >> 2) & 0x1F) as usize],
            alphabet[((b3 & 0x03) << 3 | b4 >> 5) as usize],
            alphabet[(b4 & 0x1F) as usize],
        ];
        let keep = BASE32_DATA_SYMBOLS[chunk.len() % 5];
        out.extend_from_slice(&symbols[..keep]);
        out.resize(out.len() + (8 - keep), PAD);
    }
}

/// Pre-computed hex encoding table: byte → 2 hex chars.
const fn build_hex_table() -> [[u8; 2]; 256] {
    let hex = alphabet::BASE16_ALPHABET;
    let mut table = [[0u8; 2]; 256];
    let mut i = 0usize;
    while i < 256 {
        table[i] = [hex[i >> 4], hex[i & 0x0F]];
        i += 1;
    }
    table
}

static HEX_TABLE: [[u8; 2]; 256] = build_hex_table();

fn base16_encode(data: &[u8], out: &mut Vec<u8>) {
    out.reserve(data.len() * 2);
    for &b in data {
        out.extend_from_slice(&HEX_TABLE[b as usize]);
    }
}

/// Byte → 8 bit characters. `msb_first` picks the bit order.
const fn build_base2_table(msb_first: bool) -> [[u8; 8]; 256] {
    let mut table = [[0u8; 8]; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut j = 0;
        while j < 8 {
            let shift = if msb_first { 7 - j } else { j };
            table[i][j] = alphabet::BASE2_ALPHABET[(i >> shift) & 1];
            j += 1;
        }
        i += 1;
    }
    table
}

static BASE2_MSBF_TABLE: [[u8; 8]; 256] = build_base2_table(true);
static BASE2_LSBF_TABLE: [[u8; 8]; 256] = build_base2_table(false);

fn base2_encode(data: &[u8], table: &[[u8; 8]; 256], out: &mut Vec<u8>) {
    out.reserve(data.len() * 8);
    for &b in data {
        out.extend_from_slice(&table[b as usize]);
    }
}

fn z85_encode(data: &[u8], out: &mut Vec<u8>) -> Result<()> {
    if !data.len().is_multiple_of(4) {
        return Err(BasencError::MisalignedLength(
            "length must be a multiple of 4 for Z85 encoding",
        ));
    }
    out.reserve(data.len() / 4 * 5);
    for chunk in data.chunks_exact(4) {
        let mut value = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let mut chars = [0u8; 5];
        for c in chars.iter_mut().rev() {
            *c = alphabet::Z85_ALPHABET[(value % 85) as usize];
            value /= 85;
        }
        out.extend_from_slice(&chars);
    }
    Ok(())
}

// ======================== Decode ========================

/// Decode significant symbols of `scheme`, appending bytes to `out`.
///
/// `symbols` must hold only alphabet symbols and, for padded schemes, `=`.
/// Unless `last` is set its length must be a whole number of groups; with
/// `last`, a trailing partial group is decoded or rejected according to the
/// scheme. `first_index` is the position of `symbols[0]` among all the
/// significant symbols of the stream; errors report positions on that scale.
pub fn decode_block(
    scheme: Scheme,
    symbols: &[u8],
    last: bool,
    first_index: u64,
    out: &mut Vec<u8>,
) -> Result<()> {
    let width = scheme.output_group();
    debug_assert!(last || symbols.len().is_multiple_of(width));

    let full_end = symbols.len() / width * width;
    let (whole, tail) = symbols.split_at(full_end);

    match scheme {
        Scheme::Base64 | Scheme::Base64Url | Scheme::Base32 | Scheme::Base32Hex => {
            for (i, group) in whole.chunks_exact(width).enumerate() {
                decode_padded_group(scheme, group, first_index + (i * width) as u64, out)?;
            }
            if !tail.is_empty() {
                decode_unpadded_tail(scheme, tail, out)?;
            }
        }
        Scheme::Base16 => {
            out.reserve(whole.len() / 2);
            for pair in whole.chunks_exact(2) {
                out.push(value(scheme, pair[0]) << 4 | value(scheme, pair[1]));
            }
            if !tail.is_empty() {
                return Err(BasencError::MisalignedLength("odd number of hex digits"));
            }
        }
        Scheme::Base2Msbf | Scheme::Base2Lsbf => {
            let msb_first = scheme == Scheme::Base2Msbf;
            out.reserve(whole.len() / 8);
            for bits in whole.chunks_exact(8) {
                let byte = bits.iter().enumerate().fold(0u8, |acc, (j, &s)| {
                    let bit = value(scheme, s);
                    if msb_first {
                        acc << 1 | bit
                    } else {
                        acc | bit << j
                    }
                });
                out.push(byte);
            }
            if !tail.is_empty() {
                return Err(BasencError::MisalignedLength(
                    "number of bits not a multiple of 8",
                ));
            }
        }
        Scheme::Z85 => {
            if !tail.is_empty() {
                return Err(BasencError::MisalignedLength(
                    "length must be a multiple of 5 for Z85 decoding",
                ));
            }
            out.reserve(whole.len() / 5 * 4);
            for (i, group) in whole.chunks_exact(5).enumerate() {
                let v = group
                    .iter()
                    .fold(0u64, |acc, &s| acc * 85 + u64::from(value(scheme, s)));
                let v = u32::try_from(v).map_err(|_| BasencError::Overflow {
                    index: first_index + (i * 5) as u64,
                })?;
                out.extend_from_slice(&v.to_be_bytes());
            }
        }
    }
    Ok(())
}

/// Value of a symbol already known to be in the alphabet.
#[inline]
fn value(scheme: Scheme, symbol: u8) -> u8 {
    alphabet::value_of(scheme, symbol).unwrap_or(0)
}

/// Number of whole bytes carried by `n` data symbols of a padded scheme,
/// or `None` when `n` symbols cannot end a group.
fn bytes_for_symbols(scheme: Scheme, n: usize) -> Option<usize> {
    match (scheme.output_group(), n) {
        (4, 2) => Some(1),
        (4, 3) => Some(2),
        (4, 4) => Some(3),
        (8, 2) => Some(1),
        (8, 4) => Some(2),
        (8, 5) => Some(3),
        (8, 7) => Some(4),
        (8, 8) => Some(5),
        _ => None,
    }
}

/// Decode one complete group of a padded scheme. Once `=` appears, the rest
/// of the group must be `=`.
fn decode_padded_group(
    scheme: Scheme,
    group: &[u8],
    first_index: u64,
    out: &mut Vec<u8>,
) -> Result<()> {
    let data_len = group.iter().position(|&s| s == PAD).unwrap_or(group.len());
    if let Some(i) = group[data_len..].iter().position(|&s| s != PAD) {
        return Err(BasencError::InvalidInputSymbol {
            byte: group[data_len + i],
            offset: first_index + (data_len + i) as u64,
        });
    }
    emit_group(scheme, &group[..data_len], out)
}

/// A final group that ran out of input before reaching full width.
fn decode_unpadded_tail(scheme: Scheme, tail: &[u8], out: &mut Vec<u8>) -> Result<()> {
    if tail.contains(&PAD) {
        return Err(BasencError::MisalignedLength("incomplete padding"));
    }
    emit_group(scheme, tail, out)
}

/// Regroup `data` symbols (no padding) into bytes, big-endian.
fn emit_group(scheme: Scheme, data: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let n_bytes = bytes_for_symbols(scheme, data.len())
        .ok_or(BasencError::MisalignedLength("truncated group"))?;
    let bits_per_symbol = match scheme.output_group() {
        4 => 6,
        _ => 5,
    };
    let mut acc: u64 = 0;
    for &s in data {
        acc = acc << bits_per_symbol | u64::from(value(scheme, s));
    }
    // Left-align the accumulated bits, then read bytes off the top.
    let total_bits = data.len() * bits_per_symbol;
    acc <<= 64 - total_bits;
    for i in 0..n_bytes {
        out.push((acc >> (56 - 8 * i)) as u8);
    }
    Ok(())
}
