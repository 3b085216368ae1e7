//! Symbol tables for every scheme.
//!
//! Forward tables are the alphabets themselves. Inverse tables are built at
//! compile time; `INVALID` marks bytes that are not symbols.

use super::scheme::Scheme;

/// Marker for "not a symbol" in the inverse tables.
pub const INVALID: u8 = 0xFF;

/// Padding symbol of the base64 and base32 families.
pub const PAD: u8 = b'=';

pub const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
pub const BASE64URL_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
pub const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
pub const BASE32HEX_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
pub const BASE16_ALPHABET: &[u8; 16] = b"0123456789ABCDEF";
pub const BASE2_ALPHABET: &[u8; 2] = b"01";
pub const Z85_ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// First byte covered by the z85 inverse table (`!`).
const Z85_FIRST: u8 = 33;
/// Bytes `!`..=`}`, the printable range the z85 alphabet is drawn from.
const Z85_SPAN: usize = 93;

/// Build a 256-entry inverse table. With `fold_case`, lowercase letters map
/// to the value of their uppercase form.
const fn build_decode_table(alphabet: &[u8], fold_case: bool) -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < alphabet.len() {
        let c = alphabet[i];
        table[c as usize] = i as u8;
        if fold_case && c.is_ascii_uppercase() {
            table[c.to_ascii_lowercase() as usize] = i as u8;
        }
        i += 1;
    }
    table
}

const fn build_z85_decode_table() -> [u8; Z85_SPAN] {
    let mut table = [INVALID; Z85_SPAN];
    let mut i = 0;
    while i < Z85_ALPHABET.len() {
        table[(Z85_ALPHABET[i] - Z85_FIRST) as usize] = i as u8;
        i += 1;
    }
    table
}

pub(crate) static BASE64_DECODE: [u8; 256] = build_decode_table(BASE64_ALPHABET, false);
pub(crate) static BASE64URL_DECODE: [u8; 256] = build_decode_table(BASE64URL_ALPHABET, false);
pub(crate) static BASE32_DECODE: [u8; 256] = build_decode_table(BASE32_ALPHABET, true);
pub(crate) static BASE32HEX_DECODE: [u8; 256] = build_decode_table(BASE32HEX_ALPHABET, true);
pub(crate) static BASE16_DECODE: [u8; 256] = build_decode_table(BASE16_ALPHABET, true);
pub(crate) static BASE2_DECODE: [u8; 256] = build_decode_table(BASE2_ALPHABET, false);
static Z85_DECODE: [u8; Z85_SPAN] = build_z85_decode_table();

/// The ordered symbol set of `scheme`.
pub fn alphabet(scheme: Scheme) -> &'static [u8] {
    match scheme {
        Scheme::Base64 => BASE64_ALPHABET,
        Scheme::Base64Url => BASE64URL_ALPHABET,
        Scheme::Base32 => BASE32_ALPHABET,
        Scheme::Base32Hex => BASE32HEX_ALPHABET,
        Scheme::Base16 => BASE16_ALPHABET,
        Scheme::Base2Msbf | Scheme::Base2Lsbf => BASE2_ALPHABET,
        Scheme::Z85 => Z85_ALPHABET,
    }
}

/// Symbol for `value`. Panics if `value` is outside the alphabet, which
/// only a codec bug can cause.
#[inline]
pub fn symbol_of(scheme: Scheme, value: u8) -> u8 {
    alphabet(scheme)[value as usize]
}

/// Value of `symbol`, or `None` for bytes outside the alphabet.
/// base32, base32hex and base16 accept either letter case.
#[inline]
pub fn value_of(scheme: Scheme, symbol: u8) -> Option<u8> {
    let v = match scheme {
        Scheme::Base64 => BASE64_DECODE[symbol as usize],
        Scheme::Base64Url => BASE64URL_DECODE[symbol as usize],
        Scheme::Base32 => BASE32_DECODE[symbol as usize],
        Scheme::Base32Hex => BASE32HEX_DECODE[symbol as usize],
        Scheme::Base16 => BASE16_DECODE[symbol as usize],
        Scheme::Base2Msbf | Scheme::Base2Lsbf => BASE2_DECODE[symbol as usize],
        Scheme::Z85 => symbol
            .checked_sub(Z85_FIRST)
            .and_then(|i| Z85_DECODE.get(i as usize).copied())
            .unwrap_or(INVALID),
    };
    (v != INVALID).then_some(v)
}
