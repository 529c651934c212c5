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

//! # Address Classification
//!
//! Boolean and enum classifiers over untrusted strings. None of these
//! functions fail: codec errors are logged at `trace` level and reported as
//! "not an address".
//!
//! Two levels of rigour are offered on purpose. [`is_cosmos_address`] and
//! [`is_valid_bech32_address`] verify the checksum, while
//! [`get_address_type`] only looks at the shape of the string and is meant
//! for hot paths where a wrong but well-formed string will fail later, at
//! conversion time.

use std::fmt;

use tracing::trace;

use crate::address::AccountId;
use crate::bech32;
use crate::hex::is_hex_digits;

/// Number of bech32 data characters (checksum included) carrying a 20-byte
/// account.
const ACCOUNT_DATA_CHARS: usize = 38;

/// The two address families an account can be written in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AddressKind {
    /// `0x`-prefixed hex.
    Evm,
    /// Bech32 under a chain-specific prefix.
    Cosmos,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressKind::Evm => f.write_str("evm"),
            AddressKind::Cosmos => f.write_str("cosmos"),
        }
    }
}

/// What a search box query most likely refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchInputType {
    /// A decimal block number.
    BlockHeight,
    /// `0x` followed by 64 hex digits.
    EvmTxHash,
    /// `0x` followed by 40 hex digits.
    EvmAddress,
    /// 64 hex digits without a prefix.
    TxHash,
    /// A checksum-valid bech32 string long enough to hold an address.
    Bech32Address,
    /// Anything else.
    Unknown,
}

/// Whether `s` is `0x` followed by exactly 40 hex digits of either case.
///
/// There is no checksum on this side; mixed-case (EIP-55) strings are
/// accepted as-is.
pub fn is_evm_address(s: &str) -> bool {
    is_0x_hex(s, 2 * AccountId::LEN)
}

/// Whether `s` is a checksum-valid bech32 string carrying a 20-byte payload,
/// optionally under the human-readable part `expected_hrp`.
///
/// The decoded prefix is always lower case and must equal `expected_hrp`
/// exactly.
pub fn is_cosmos_address(s: &str, expected_hrp: Option<&str>) -> bool {
    match bech32::decode(s) {
        Ok((hrp, payload)) => {
            if payload.len() != AccountId::LEN {
                trace!(input = s, len = payload.len(), "bech32 payload is not an account");
                return false;
            }
            match expected_hrp {
                Some(expected) if hrp != expected => {
                    trace!(input = s, %hrp, expected, "unexpected bech32 prefix");
                    false
                }
                _ => true,
            }
        }
        Err(e) => {
            trace!(input = s, error = %e, "not a bech32 address");
            false
        }
    }
}

/// Validates untrusted input as a bech32 address.
///
/// A cheap shape check runs first and rejects obviously malformed strings
/// without touching the checksum. Only strings that pass it have their
/// checksum verified. Payloads longer than an account (contract addresses)
/// are accepted.
pub fn is_valid_bech32_address(s: &str) -> bool {
    match bech32_data_len(s) {
        Some(n) if n >= ACCOUNT_DATA_CHARS => {}
        _ => return false,
    }
    match bech32::validate_checksum(s) {
        Ok(()) => true,
        Err(e) => {
            trace!(input = s, error = %e, "bech32 checksum rejected");
            false
        }
    }
}

/// Classifies a search query.
///
/// The checks run in a fixed order and the first match wins: an all-digit
/// string is a block height even if it happens to be 64 characters long, and
/// `0x` plus 64 digits is a transaction hash before it could be anything
/// else.
pub fn detect_search_input_type(s: &str) -> SearchInputType {
    let s = s.trim();
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        SearchInputType::BlockHeight
    } else if is_0x_hex(s, 64) {
        SearchInputType::EvmTxHash
    } else if is_evm_address(s) {
        SearchInputType::EvmAddress
    } else if s.len() == 64 && is_hex_digits(s) {
        SearchInputType::TxHash
    } else if is_valid_bech32_address(s) {
        SearchInputType::Bech32Address
    } else {
        SearchInputType::Unknown
    }
}

/// Guesses the address family of `s` from its shape alone.
///
/// No checksum is verified: a bech32 string with a corrupted checksum is
/// still reported as [`AddressKind::Cosmos`].
pub fn get_address_type(s: &str) -> Option<AddressKind> {
    if is_evm_address(s) {
        Some(AddressKind::Evm)
    } else if bech32_data_len(s) == Some(ACCOUNT_DATA_CHARS) {
        Some(AddressKind::Cosmos)
    } else {
        None
    }
}

fn is_0x_hex(s: &str, digits: usize) -> bool {
    match s.strip_prefix("0x") {
        Some(rest) => rest.len() == digits && is_hex_digits(rest),
        None => false,
    }
}

/// Checks that `s` looks like `letters + "1" + data`, in one case, with every
/// data character in the bech32 alphabet. Returns the length of the data part.
fn bech32_data_len(s: &str) -> Option<usize> {
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower {
        return None;
    }

    let s = s.to_ascii_lowercase();
    let sep = s.rfind(bech32::SEP)?;
    let (hrp, data) = (&s[..sep], &s[sep + 1..]);
    if hrp.is_empty() || !hrp.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if !data.chars().all(bech32::is_charset_char) {
        return None;
    }
    Some(data.len())
}
