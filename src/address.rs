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

//! # Addresses
//!
//! An account is a 20-byte identity, usually a public-key hash, with two
//! textual forms: `0x`-prefixed hex on the EVM side and bech32 under a
//! chain-specific human-readable part on the Cosmos side. Validator operators
//! use the account prefix with a `valoper` suffix.
//!
//! The converters in this module are strict and return an error when the
//! input is not what they expect. [`parse_address`] is the lenient entry
//! point for untrusted input.

use std::error;
use std::fmt;
use std::str::FromStr;

use bitcoin::hashes::{hash160, Hash};
use bitcoin::secp256k1;
use hex_conservative::DisplayHex;
use tracing::trace;

use crate::bech32;
use crate::classify::{self, AddressKind};
use crate::error::write_err;
use crate::hex;

/// Suffix appended to the account prefix for validator-operator addresses.
pub const VALOPER_SUFFIX: &str = "valoper";

/// Address conversion error
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddressError {
    /// Bech32 encoding error
    Bech32(bech32::Error),
    /// The decoded payload is not 20 bytes long.
    InvalidLength(usize),
    /// The human-readable part is not the one that was expected.
    InvalidHrp(String),
    /// The string is not `0x` followed by 40 hex digits.
    InvalidInput(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressError::Bech32(ref e) => write_err!(f, "invalid bech32 address"; e),
            AddressError::InvalidLength(len) => {
                write!(f, "an account is {} bytes long, not {}", AccountId::LEN, len)
            }
            AddressError::InvalidHrp(ref hrp) => {
                write!(f, "unexpected human-readable part: {}", hrp)
            }
            AddressError::InvalidInput(ref s) => write!(f, "not an EVM address: {}", s),
        }
    }
}

impl error::Error for AddressError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            AddressError::Bech32(ref e) => Some(e),
            AddressError::InvalidLength(_)
            | AddressError::InvalidHrp(_)
            | AddressError::InvalidInput(_) => None,
        }
    }
}

#[doc(hidden)]
impl From<bech32::Error> for AddressError {
    fn from(e: bech32::Error) -> AddressError {
        AddressError::Bech32(e)
    }
}

/// Returns the validator-operator prefix for the account prefix `hrp`.
pub fn validator_hrp(hrp: &str) -> String {
    format!("{}{}", hrp, VALOPER_SUFFIX)
}

/// The 20-byte identity behind both address forms.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// Length of an account identity in bytes.
    pub const LEN: usize = 20;

    /// Wraps a 20-byte array.
    pub fn from_byte_array(bytes: [u8; 20]) -> AccountId {
        AccountId(bytes)
    }

    /// Copies a 20-byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<AccountId, AddressError> {
        let mut ret = [0u8; 20];
        if bytes.len() != ret.len() {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        ret.copy_from_slice(bytes);
        Ok(AccountId(ret))
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Derives the account of a secp256k1 key the way Cosmos-SDK chains do,
    /// as RIPEMD160(SHA256(compressed key)).
    pub fn from_secp256k1_pubkey(pk: &secp256k1::PublicKey) -> AccountId {
        AccountId(hash160::Hash::hash(&pk.serialize()).to_byte_array())
    }

    /// Parses `0x` followed by 40 hex digits of either case.
    pub fn from_evm(s: &str) -> Result<AccountId, AddressError> {
        if !classify::is_evm_address(s) {
            return Err(AddressError::InvalidInput(s.to_owned()));
        }
        hex::decode_20(&s[2..])
            .map(AccountId)
            .map_err(|_| AddressError::InvalidInput(s.to_owned()))
    }

    /// Decodes a bech32 account or validator address, returning its lower-case
    /// human-readable part alongside the identity.
    pub fn from_bech32(s: &str) -> Result<(String, AccountId), AddressError> {
        let (hrp, payload) = bech32::decode(s)?;
        Ok((hrp, AccountId::from_slice(&payload)?))
    }

    /// Encodes the identity as bech32 under `hrp`.
    pub fn to_bech32(&self, hrp: &str) -> Result<String, AddressError> {
        Ok(bech32::encode(hrp, &self.0)?)
    }

    /// Encodes the identity as a validator-operator address for the account
    /// prefix `hrp`.
    pub fn to_validator_bech32(&self, hrp: &str) -> Result<String, AddressError> {
        self.to_bech32(&validator_hrp(hrp))
    }

    /// The lower-case `0x` hex form.
    pub fn to_evm(&self) -> String {
        format!("0x{}", self.0.to_lower_hex_string())
    }
}

impl fmt::LowerHex for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0.as_hex(), f)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<AccountId, AddressError> {
        AccountId::from_evm(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AccountId {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt::Formatter;

        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = AccountId;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a 0x-prefixed 20-byte hex address")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                AccountId::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Converts an EVM hex address to its bech32 form under `hrp`.
pub fn evm_to_cosmos_address(hex: &str, hrp: &str) -> Result<String, AddressError> {
    AccountId::from_evm(hex)?.to_bech32(hrp)
}

/// Converts a bech32 account (or validator) address to lower-case EVM hex.
pub fn cosmos_to_evm_address(addr: &str) -> Result<String, AddressError> {
    let (_, id) = AccountId::from_bech32(addr)?;
    Ok(id.to_evm())
}

/// Converts an EVM hex address to a validator-operator address for the
/// account prefix `hrp`.
pub fn evm_to_validator_address(hex: &str, hrp: &str) -> Result<String, AddressError> {
    AccountId::from_evm(hex)?.to_validator_bech32(hrp)
}

/// Converts a validator-operator address to the account address of the same
/// key by dropping the `valoper` suffix from its prefix.
pub fn validator_to_account_address(valoper: &str) -> Result<String, AddressError> {
    let (hrp, id) = AccountId::from_bech32(valoper)?;
    match hrp.strip_suffix(VALOPER_SUFFIX) {
        Some(account) if !account.is_empty() => id.to_bech32(account),
        _ => Err(AddressError::InvalidHrp(hrp)),
    }
}

/// Both forms of an address given in either form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParsedAddress {
    /// The form the input was written in; `None` when it is neither.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<AddressKind>,
    /// Lower-case `0x` hex form.
    pub evm_address: Option<String>,
    /// Lower-case bech32 form.
    pub cosmos_address: Option<String>,
    /// Whether the bech32 prefix marks a validator operator.
    pub is_validator: bool,
}

impl ParsedAddress {
    /// Whether the input was recognised at all.
    pub fn is_known(&self) -> bool {
        self.kind.is_some()
    }
}

/// Resolves untrusted input to both of its address forms.
///
/// Hex input is re-encoded under `hrp`. Bech32 input is accepted under any
/// prefix as long as its checksum holds and it carries 20 bytes; the EVM form
/// is derived from it. Never fails: unrecognised input yields a
/// [`ParsedAddress`] with every field empty.
pub fn parse_address(s: &str, hrp: &str) -> ParsedAddress {
    if classify::is_evm_address(s) {
        let id = match AccountId::from_evm(s) {
            Ok(id) => id,
            Err(e) => {
                trace!(input = s, error = %e, "hex address rejected");
                return ParsedAddress::default();
            }
        };
        let cosmos_address = match id.to_bech32(hrp) {
            Ok(addr) => Some(addr),
            Err(e) => {
                trace!(input = s, hrp, error = %e, "no bech32 form for hex address");
                None
            }
        };
        return ParsedAddress {
            kind: Some(AddressKind::Evm),
            evm_address: Some(id.to_evm()),
            cosmos_address,
            is_validator: false,
        };
    }

    match AccountId::from_bech32(s) {
        Ok((prefix, id)) => ParsedAddress {
            kind: Some(AddressKind::Cosmos),
            evm_address: Some(id.to_evm()),
            cosmos_address: Some(s.to_ascii_lowercase()),
            is_validator: prefix.contains(VALOPER_SUFFIX),
        },
        Err(e) => {
            trace!(input = s, error = %e, "unrecognised address");
            ParsedAddress::default()
        }
    }
}

/// The two addresses of a connected wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalletAddresses {
    /// Lower-case `0x` hex form.
    pub evm: String,
    /// Bech32 form under the active account prefix.
    pub cosmos: String,
}

/// Derives both addresses of a wallet from the one it reports natively, hex
/// for an EVM wallet or bech32 for a Cosmos wallet.
///
/// The form is picked from the shape of `native` only; a malformed address
/// fails in the conversion that follows.
pub fn wallet_addresses(native: &str, hrp: &str) -> Result<WalletAddresses, AddressError> {
    let id = match classify::get_address_type(native) {
        Some(AddressKind::Evm) => AccountId::from_evm(native)?,
        Some(AddressKind::Cosmos) => AccountId::from_bech32(native)?.1,
        None => return Err(AddressError::InvalidInput(native.to_owned())),
    };
    Ok(WalletAddresses { evm: id.to_evm(), cosmos: id.to_bech32(hrp)? })
}

#[cfg(test)]
mod test {
    use super::*;

    const HEX: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0beb1";
    const HEX_MIXED: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1";
    const RAI: &str = "rai1wskntnrxxnq9x2f95wuyf0y7wk2lp043vg3psv";
    const RAI_VALOPER: &str = "raivaloper1wskntnrxxnq9x2f95wuyf0y7wk2lp043ta3um6";
    const COSMOS: &str = "cosmos1wskntnrxxnq9x2f95wuyf0y7wk2lp043zhrtp0";

    #[test]
    fn test_actuals() {
        // vectors: (hex, hrp, account, validator)
        let vectors = [
            (HEX, "rai", RAI, RAI_VALOPER),
            (
                HEX,
                "cosmos",
                COSMOS,
                "cosmosvaloper1wskntnrxxnq9x2f95wuyf0y7wk2lp0438rh7du",
            ),
            (
                "0x0000000000000000000000000000000000000000",
                "rai",
                "rai1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqauj4k7",
                "raivaloper1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq6fjgag",
            ),
            (
                "0xffffffffffffffffffffffffffffffffffffffff",
                "rai",
                "rai1llllllllllllllllllllllllllllllll3dn635",
                "raivaloper1llllllllllllllllllllllllllllllllkcn86z",
            ),
        ];

        for &(hex, hrp, account, validator) in &vectors {
            assert_eq!(evm_to_cosmos_address(hex, hrp).unwrap(), account);
            assert_eq!(evm_to_validator_address(hex, hrp).unwrap(), validator);
            assert_eq!(cosmos_to_evm_address(account).unwrap(), hex);
            assert_eq!(cosmos_to_evm_address(validator).unwrap(), hex);
            assert_eq!(validator_to_account_address(validator).unwrap(), account);
        }
    }

    #[test]
    fn hex_input_is_case_insensitive() {
        assert_eq!(evm_to_cosmos_address(HEX_MIXED, "rai").unwrap(), RAI);
        assert_eq!(evm_to_cosmos_address(&HEX.to_ascii_uppercase().replace("0X", "0x"), "rai").unwrap(), RAI);
        assert_eq!(cosmos_to_evm_address(&RAI.to_ascii_uppercase()).unwrap(), HEX);
    }

    #[test]
    fn strict_errors() {
        assert_eq!(
            evm_to_cosmos_address(&HEX[..41], "rai"),
            Err(AddressError::InvalidInput(HEX[..41].to_owned()))
        );
        assert_eq!(
            evm_to_cosmos_address(&HEX[2..], "rai"),
            Err(AddressError::InvalidInput(HEX[2..].to_owned()))
        );
        assert_eq!(
            evm_to_cosmos_address(HEX, ""),
            Err(AddressError::Bech32(bech32::Error::InvalidHrp(String::new())))
        );
        assert_eq!(
            cosmos_to_evm_address("rai1wskntnrxxnq9x2f95wuyf0y7wk2lp043vg3psw"),
            Err(AddressError::Bech32(bech32::Error::InvalidChecksum))
        );
        assert_eq!(cosmos_to_evm_address("A12UEL5L"), Err(AddressError::InvalidLength(0)));
        assert_eq!(
            cosmos_to_evm_address("rai1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v9ccrydpk8qarc0spvx47p"),
            Err(AddressError::InvalidLength(32))
        );
        assert_eq!(
            validator_to_account_address(RAI),
            Err(AddressError::InvalidHrp("rai".to_owned()))
        );
    }

    #[test]
    fn error_messages() {
        let err = cosmos_to_evm_address("pzry9x0s0muk").unwrap_err();
        assert_eq!(err.to_string(), "invalid bech32 address");
        let source = error::Error::source(&err).expect("bech32 error has a source");
        assert_eq!(source.to_string(), "missing or misplaced separator \"1\"");

        assert_eq!(
            AddressError::InvalidLength(32).to_string(),
            "an account is 20 bytes long, not 32"
        );
    }

    #[test]
    fn account_id_formatting() {
        let id: AccountId = HEX_MIXED.parse().unwrap();
        assert_eq!(id.to_string(), HEX);
        assert_eq!(id.to_evm(), HEX);
        assert_eq!(format!("{:x}", id), &HEX[2..]);
        assert_eq!(format!("{:.8x}", id), "742d35cc");
        assert_eq!(format!("{:>44x}", id), format!("    {}", &HEX[2..]));
        assert_eq!(format!("{:?}", id), format!("AccountId({})", HEX));
        assert_eq!(id.to_bech32("rai").unwrap(), RAI);

        let (hrp, decoded) = AccountId::from_bech32(RAI_VALOPER).unwrap();
        assert_eq!(hrp, "raivaloper");
        assert_eq!(decoded, id);
        assert_eq!(AccountId::from_slice(&[0; 19]), Err(AddressError::InvalidLength(19)));
    }

    #[test]
    fn account_from_pubkey() {
        // the secp256k1 generator point
        let pk: secp256k1::PublicKey =
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798".parse().unwrap();
        let id = AccountId::from_secp256k1_pubkey(&pk);
        assert_eq!(id.to_evm(), "0x751e76e8199196d454941c45d1b3a323f1433bd6");
        assert_eq!(id.to_bech32("rai").unwrap(), "rai1w508d6qejxtdg4y5r3zarvary0c5xw7k5z9s7m");
    }

    #[test]
    fn parse_evm() {
        let parsed = parse_address(HEX_MIXED, "rai");
        assert_eq!(
            parsed,
            ParsedAddress {
                kind: Some(AddressKind::Evm),
                evm_address: Some(HEX.to_owned()),
                cosmos_address: Some(RAI.to_owned()),
                is_validator: false,
            }
        );
        assert!(parsed.is_known());

        // an unusable prefix leaves the bech32 side empty
        let parsed = parse_address(HEX, "");
        assert_eq!(parsed.kind, Some(AddressKind::Evm));
        assert_eq!(parsed.evm_address.as_deref(), Some(HEX));
        assert_eq!(parsed.cosmos_address, None);
    }

    #[test]
    fn parse_cosmos() {
        let parsed = parse_address(RAI, "rai");
        assert_eq!(parsed.kind, Some(AddressKind::Cosmos));
        assert_eq!(parsed.evm_address.as_deref(), Some(HEX));
        assert_eq!(parsed.cosmos_address.as_deref(), Some(RAI));
        assert!(!parsed.is_validator);

        let parsed = parse_address(RAI_VALOPER, "rai");
        assert_eq!(parsed.kind, Some(AddressKind::Cosmos));
        assert_eq!(parsed.evm_address.as_deref(), Some(HEX));
        assert_eq!(parsed.cosmos_address.as_deref(), Some(RAI_VALOPER));
        assert!(parsed.is_validator);

        // any prefix is accepted
        let parsed = parse_address(COSMOS, "rai");
        assert_eq!(parsed.cosmos_address.as_deref(), Some(COSMOS));

        let parsed = parse_address(&RAI.to_ascii_uppercase(), "rai");
        assert_eq!(parsed.cosmos_address.as_deref(), Some(RAI));
    }

    #[test]
    fn parse_unknown() {
        let inputs = [
            "",
            "hello",
            "123456",
            "rai1wskntnrxxnq9x2f95wuyf0y7wk2lp043vg3psw",
            "rai1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v9ccrydpk8qarc0spvx47p",
            "0x742d35cc6634c0532925a3b844bc9e7595f0beb",
            "Rai1wskntnrxxnq9x2f95wuyf0y7wk2lp043vg3psv",
        ];
        for s in &inputs {
            let parsed = parse_address(s, "rai");
            assert_eq!(parsed, ParsedAddress::default(), "input: {:?}", s);
            assert!(!parsed.is_known());
        }
    }

    #[test]
    fn wallet_counterparts() {
        let want = WalletAddresses { evm: HEX.to_owned(), cosmos: RAI.to_owned() };
        assert_eq!(wallet_addresses(HEX_MIXED, "rai").unwrap(), want);
        assert_eq!(wallet_addresses(RAI, "rai").unwrap(), want);
        // a wallet reporting another chain's prefix is shown under the active one
        assert_eq!(wallet_addresses(COSMOS, "rai").unwrap(), want);

        // well-formed but corrupted: passes the shape check, fails conversion
        assert_eq!(
            wallet_addresses("rai1wskntnrxxnq9x2f95wuyf0y7wk2lp043vg3psw", "rai"),
            Err(AddressError::Bech32(bech32::Error::InvalidChecksum))
        );
        assert_eq!(
            wallet_addresses("not an address", "rai"),
            Err(AddressError::InvalidInput("not an address".to_owned()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_shapes() {
        let parsed = parse_address(RAI_VALOPER, "rai");
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "cosmos",
                "evmAddress": HEX,
                "cosmosAddress": RAI_VALOPER,
                "isValidator": true,
            })
        );
        let unknown = serde_json::to_value(&ParsedAddress::default()).unwrap();
        assert_eq!(unknown["type"], serde_json::Value::Null);

        let id: AccountId = HEX.parse().unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!(HEX));
        let back: AccountId = serde_json::from_value(serde_json::json!(HEX_MIXED)).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_value::<AccountId>(serde_json::json!(RAI)).is_err());
    }
}
