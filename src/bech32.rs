// Dual Address Library
// Written by
//   The dual-address developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Bech32
//!
//! The checksummed base32 encoding used for account and validator-operator
//! addresses on Cosmos-SDK-style chains.
//!
//! The checksum is defined once, as [`Bech32Checksum`], and plugged into the
//! `bech32` crate's primitives for parsing, checksumming and regrouping. The
//! codec is agnostic of the payload length; address-specific rules (20-byte
//! payloads, expected prefixes) live in [`crate::classify`] and
//! [`crate::address`].
//!
//! A bech32 string consists of:
//!
//! - The human-readable part (HRP), 1 to 83 US-ASCII characters in the range
//!   33 to 126.
//! - The separator, which is always the last "1" of the string.
//! - The data part, the payload regrouped into 5-bit symbols, followed by a
//!   6-symbol checksum.
//!
//! The whole string must be of one case. Upper-case strings are accepted and
//! the HRP is always returned in lower case. Strings longer than 1023
//! characters are rejected, since the checksum guarantees nothing beyond that.

use std::fmt;

use ::bech32::primitives::decode::{
    CharError, CheckedHrpstring, CheckedHrpstringError, ChecksumError, UncheckedHrpstring,
    UncheckedHrpstringError,
};
use ::bech32::primitives::hrp;
use ::bech32::{ByteIterExt, Checksum, Fe32, Fe32IterExt, Hrp};

use crate::error::impl_std_error;

/// Human-readable part and data part separator.
pub const SEP: char = '1';

/// Number of checksum symbols at the end of the data part.
pub const CHECKSUM_LENGTH: usize = 6;

/// Maximum length of the human-readable part.
pub const MAX_HRP_LENGTH: usize = 83;

/// The BIP-173 bech32 checksum.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bech32Checksum {}

impl Checksum for Bech32Checksum {
    type MidstateRepr = u32;
    const CODE_LENGTH: usize = 1023;
    const CHECKSUM_LENGTH: usize = 6;
    const GENERATOR_SH: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];
    const TARGET_RESIDUE: u32 = 1;
}

/// Errors produced while encoding or decoding a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The separator is missing, is the first character, or is followed by
    /// fewer characters than the checksum needs.
    InvalidSeparator,
    /// A data character outside of the 32-symbol alphabet.
    InvalidCharset(char),
    /// The checksum does not match the rest of the string.
    InvalidChecksum,
    /// Regrouping 5-bit symbols into bytes left too many or non-zero bits.
    InvalidPadding,
    /// The human-readable part is empty, too long, mixed-case or contains a
    /// character outside of printable US-ASCII.
    InvalidHrp(String),
    /// The string mixes upper and lower case characters.
    MixedCase,
    /// The string is longer than the checksum can protect.
    TooLong(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidSeparator => write!(f, "missing or misplaced separator \"{}\"", SEP),
            Error::InvalidCharset(c) => write!(f, "invalid character {:?} in data part", c),
            Error::InvalidChecksum => f.write_str("invalid checksum"),
            Error::InvalidPadding => f.write_str("invalid padding in data part"),
            Error::InvalidHrp(ref hrp) => write!(f, "invalid human-readable part {:?}", hrp),
            Error::MixedCase => f.write_str("mixed-case strings not allowed"),
            Error::TooLong(len) => write!(
                f,
                "string of {} characters exceeds the checksum length limit of {}",
                len,
                Bech32Checksum::CODE_LENGTH
            ),
        }
    }
}

impl_std_error!(Error);

/// Encodes `payload` under the human-readable part `hrp`.
///
/// An upper-case `hrp` is accepted and rendered in lower case.
pub fn encode(hrp: &str, payload: &[u8]) -> Result<String, Error> {
    let parsed = Hrp::parse(hrp).map_err(|_| Error::InvalidHrp(hrp.to_owned()))?;

    let len = parsed.len() + 1 + data_part_len(payload.len());
    if len > Bech32Checksum::CODE_LENGTH {
        return Err(Error::TooLong(len));
    }

    Ok(payload
        .iter()
        .copied()
        .bytes_to_fes()
        .with_checksum::<Bech32Checksum>(&parsed)
        .chars()
        .collect())
}

/// Decodes a bech32 string into its lower-case human-readable part and
/// payload bytes.
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Error> {
    let checked = CheckedHrpstring::new::<Bech32Checksum>(s).map_err(|e| match e {
        CheckedHrpstringError::Parse(e) => parse_error(s, e),
        CheckedHrpstringError::Checksum(e) => checksum_error(e),
        _ => Error::InvalidChecksum,
    })?;

    // Not segwit-specific: the incomplete trailing group must be at most
    // four zero bits.
    checked.validate_segwit_padding().map_err(|_| Error::InvalidPadding)?;

    Ok((checked.hrp().to_lowercase(), checked.byte_iter().collect()))
}

/// Checks the separator, the characters and the checksum of `s` without
/// regrouping the data part into bytes.
pub fn validate_checksum(s: &str) -> Result<(), Error> {
    UncheckedHrpstring::new(s)
        .map_err(|e| parse_error(s, e))?
        .validate_checksum::<Bech32Checksum>()
        .map_err(checksum_error)
}

/// Whether `s` carries a valid bech32 checksum. See [`validate_checksum`].
pub fn has_valid_checksum(s: &str) -> bool {
    validate_checksum(s).is_ok()
}

/// Whether `c` belongs to the lower-case data alphabet.
pub fn is_charset_char(c: char) -> bool {
    (c.is_ascii_lowercase() || c.is_ascii_digit()) && Fe32::from_char(c).is_ok()
}

/// Number of data characters, checksum included, needed to carry a payload of
/// `len` bytes.
pub fn data_part_len(len: usize) -> usize {
    (len * 8 + 4) / 5 + CHECKSUM_LENGTH
}

fn parse_error(s: &str, e: UncheckedHrpstringError) -> Error {
    match e {
        UncheckedHrpstringError::Char(CharError::InvalidChar(c)) => Error::InvalidCharset(c),
        UncheckedHrpstringError::Char(CharError::MixedCase) => Error::MixedCase,
        UncheckedHrpstringError::Char(_) => Error::InvalidSeparator,
        // The separator is the first character.
        UncheckedHrpstringError::Hrp(hrp::Error::Empty) => Error::InvalidSeparator,
        UncheckedHrpstringError::Hrp(_) => {
            let sep = s.rfind(SEP).unwrap_or(s.len());
            Error::InvalidHrp(s[..sep].to_owned())
        }
        _ => Error::InvalidSeparator,
    }
}

fn checksum_error(e: ChecksumError) -> Error {
    match e {
        ChecksumError::CodeLength(e) => Error::TooLong(e.encoded_length),
        // Fewer data characters than checksum symbols.
        ChecksumError::InvalidLength => Error::InvalidSeparator,
        _ => Error::InvalidChecksum,
    }
}
