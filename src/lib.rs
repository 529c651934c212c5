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

//! # Dual Address Library
//!
//! Bech32 encoding and EVM/bech32 address resolution for Cosmos-SDK-style
//! chains that expose the same 20-byte accounts through an EVM.
//!
//! The same account can be written as `0x`-prefixed hex or as bech32 under
//! the chain's human-readable prefix (`rai1...`, or `raivaloper1...` for a
//! validator operator). This crate converts between the two, classifies
//! untrusted input, and keeps the active chain's prefix in an injectable
//! cache.
//!
//! ```
//! use dual_address::{evm_to_cosmos_address, parse_address, AddressKind};
//!
//! let hex = "0x742d35cc6634c0532925a3b844bc9e7595f0beb1";
//! let bech = evm_to_cosmos_address(hex, "rai").unwrap();
//! assert_eq!(bech, "rai1wskntnrxxnq9x2f95wuyf0y7wk2lp043vg3psv");
//!
//! let parsed = parse_address(&bech, "rai");
//! assert_eq!(parsed.kind, Some(AddressKind::Cosmos));
//! assert_eq!(parsed.evm_address.as_deref(), Some(hex));
//! ```
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

mod error;
pub mod address;
pub mod bech32;
pub mod classify;
pub mod hex;
pub mod params;

// export everything at the top level so it can be used as `dual_address::parse_address` etc.
pub use crate::address::{
    cosmos_to_evm_address, evm_to_cosmos_address, evm_to_validator_address, parse_address,
    validator_hrp, validator_to_account_address, wallet_addresses, AccountId, AddressError,
    ParsedAddress, WalletAddresses, VALOPER_SUFFIX,
};
pub use crate::classify::{
    detect_search_input_type, get_address_type, is_cosmos_address, is_evm_address,
    is_valid_bech32_address, AddressKind, SearchInputType,
};
pub use crate::params::{ChainParams, ParamsError, PrefixCache, PrefixSource, StaticSource};
