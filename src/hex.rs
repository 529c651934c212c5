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

//! Hex Encoding and Decoding
//!
//! The EVM side of an account is plain lower-case hex. Parsing and rendering
//! both go through `hex-conservative`; this module only adds the shape checks
//! the classifier needs.

use hex_conservative::{FromHex, HexToArrayError};

/// Whether `s` is non-empty and consists of ASCII hex digits only.
pub fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parses exactly 40 hex digits, of either case, into a 20-byte array.
pub fn decode_20(s: &str) -> Result<[u8; 20], HexToArrayError> {
    <[u8; 20]>::from_hex(s)
}
