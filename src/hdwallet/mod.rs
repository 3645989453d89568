/*
    This module implements hierarchical deterministic key
    derivation under the BIP-32 standard: extended private and
    public keys, hardened and normal child key derivation,
    derivation paths and a navigator that walks them.
*/

mod ckd;
mod extended_keys;
#[allow(clippy::module_inception)]
mod hdwallet;
mod hierarchy;
mod path;

pub use ckd::{derive_xprv, derive_xpub, ChildOptions, HARDENED_OFFSET};
pub use extended_keys::{ExtendedKey, Xprv, Xpub};
pub use hdwallet::{DerivedKey, HDWallet};
pub use hierarchy::Hierarchy;
pub use path::Path;

use crate::bip39::MnemonicErr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HDWError {
    #[error("seed produced an invalid master key, retry with a different seed")]
    InvalidMasterKey,
    #[error("child at index {0} is invalid, retry with the next index")]
    InvalidChildKey(u32),
    #[error("hardened derivation requires the parent private key")]
    PrivateKeyRequired,
    #[error("parent is already at the maximum depth of 255")]
    DepthOverflow,
    #[error("malformed path segment '{0}'")]
    InvalidPathSyntax(String),
    #[error("index {0} does not fit in 31 bits")]
    IndexOutOfRange(u64),
    #[error("derivation failed at path segment {segment}: {source}")]
    DerivationFailed {
        segment: usize,
        #[source]
        source: Box<HDWError>,
    },
    #[error("invalid character at position {0} in serialized key")]
    BadChar(usize),
    #[error("serialized key failed its checksum")]
    BadChecksum,
    #[error("unrecognized version prefix {}", hex::encode(.0))]
    BadPrefix(Vec<u8>),
    #[error("malformed serialized key")]
    BadKey,
    #[error(transparent)]
    Mnemonic(#[from] MnemonicErr),
}
