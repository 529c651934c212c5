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

//! # Chain Parameters
//!
//! The active chain's bech32 prefix and native denomination, and a cache that
//! holds them once fetched.
//!
//! Nothing else in the crate reads these: converters take the prefix as an
//! argument. The cache is an ordinary value owned by the caller, so tests and
//! tools can build one around any [`PrefixSource`].

use std::error;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::address;
use crate::bech32;
#[cfg(feature = "json")]
use crate::error::write_err;

/// Errors obtaining chain parameters.
#[derive(Debug)]
#[non_exhaustive]
pub enum ParamsError {
    /// The chain metadata could not be parsed.
    #[cfg(feature = "json")]
    Json(serde_json::Error),
    /// The bech32 prefix is not a valid human-readable part.
    InvalidPrefix(bech32::Error),
    /// The source could not provide parameters.
    Unavailable(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            #[cfg(feature = "json")]
            ParamsError::Json(ref e) => write_err!(f, "invalid chain metadata"; e),
            ParamsError::InvalidPrefix(ref e) => write!(f, "invalid bech32 prefix: {}", e),
            ParamsError::Unavailable(ref why) => write!(f, "chain parameters unavailable: {}", why),
        }
    }
}

impl error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            #[cfg(feature = "json")]
            ParamsError::Json(ref e) => Some(e),
            ParamsError::InvalidPrefix(ref e) => Some(e),
            ParamsError::Unavailable(_) => None,
        }
    }
}

#[cfg(feature = "json")]
#[doc(hidden)]
impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> ParamsError {
        ParamsError::Json(e)
    }
}

/// The parameters of a chain that address handling and display depend on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainParams {
    /// The bech32 human-readable part of account addresses.
    pub bech32_prefix: String,
    /// The base denomination.
    pub denom: String,
    /// Decimal places between the base denomination and the display unit.
    pub decimals: u8,
}

impl ChainParams {
    /// Builds parameters after checking that `bech32_prefix` is usable.
    pub fn new(bech32_prefix: &str, denom: &str, decimals: u8) -> Result<ChainParams, ParamsError> {
        let params = ChainParams {
            bech32_prefix: bech32_prefix.to_owned(),
            denom: denom.to_owned(),
            decimals,
        };
        params.validate()?;
        Ok(params)
    }

    /// The RAI network parameters.
    pub fn rai() -> ChainParams {
        ChainParams { bech32_prefix: "rai".to_owned(), denom: "arai".to_owned(), decimals: 18 }
    }

    /// The Cosmos Hub parameters.
    pub fn cosmos_hub() -> ChainParams {
        ChainParams { bech32_prefix: "cosmos".to_owned(), denom: "uatom".to_owned(), decimals: 6 }
    }

    /// Parses chain metadata of the form
    /// `{"bech32_prefix": "rai", "denom": "arai", "decimals": 18}`.
    #[cfg(feature = "json")]
    pub fn from_json(s: &str) -> Result<ChainParams, ParamsError> {
        let params: ChainParams = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// The prefix of validator-operator addresses.
    pub fn validator_prefix(&self) -> String {
        address::validator_hrp(&self.bech32_prefix)
    }

    fn validate(&self) -> Result<(), ParamsError> {
        // Lower case only; the codec itself also accepts an upper-case prefix.
        bech32::encode(&self.bech32_prefix, &[]).map_err(ParamsError::InvalidPrefix)?;
        if self.bech32_prefix.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(ParamsError::InvalidPrefix(bech32::Error::InvalidHrp(
                self.bech32_prefix.clone(),
            )));
        }
        Ok(())
    }
}

/// Somewhere chain parameters can be fetched from, typically the chain's RPC
/// endpoint.
pub trait PrefixSource {
    /// Fetches the current parameters.
    fn fetch(&self) -> Result<ChainParams, ParamsError>;
}

/// A source that always returns the same parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSource(pub ChainParams);

impl PrefixSource for StaticSource {
    fn fetch(&self) -> Result<ChainParams, ParamsError> {
        Ok(self.0.clone())
    }
}

/// Caches the parameters of a [`PrefixSource`] until invalidated.
///
/// Two threads hitting a cold cache may both fetch; the last one to finish
/// is kept.
#[derive(Debug)]
pub struct PrefixCache<S> {
    source: S,
    cached: RwLock<Option<ChainParams>>,
}

impl<S: PrefixSource> PrefixCache<S> {
    /// Creates an empty cache in front of `source`.
    pub fn new(source: S) -> PrefixCache<S> {
        PrefixCache { source, cached: RwLock::new(None) }
    }

    /// Returns the cached parameters, fetching them on first use.
    pub fn get(&self) -> Result<ChainParams, ParamsError> {
        if let Some(params) = self.cached() {
            return Ok(params);
        }

        debug!("fetching chain parameters");
        let params = self.source.fetch()?;
        params.validate()?;
        debug!(prefix = %params.bech32_prefix, denom = %params.denom, "chain parameters cached");
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(params.clone());
        Ok(params)
    }

    /// Returns the account prefix. See [`PrefixCache::get`].
    pub fn hrp(&self) -> Result<String, ParamsError> {
        Ok(self.get()?.bech32_prefix)
    }

    /// Like [`PrefixCache::get`], but falls back to `fallback` if the source
    /// fails. The fallback is not cached, so the next call fetches again.
    pub fn get_or(&self, fallback: ChainParams) -> ChainParams {
        match self.get() {
            Ok(params) => params,
            Err(e) => {
                warn!(error = %e, prefix = %fallback.bech32_prefix, "using fallback chain parameters");
                fallback
            }
        }
    }

    /// Drops the cached parameters; the next access fetches again.
    pub fn invalidate(&self) {
        debug!("chain parameters invalidated");
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The cached parameters, without fetching.
    pub fn cached(&self) -> Option<ChainParams> {
        self.cached.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
