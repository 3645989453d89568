/*
    Child key derivation from parent extended private and
    public keys under the BIP-32 standard.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
*/

use crate::{
    hash,
    hdwallet::{ExtendedKey, HDWError, Xprv, Xpub},
};
use std::fmt;

/// Wire offset for hardened child indices. Hardened and normal
/// children split the u32 index space in half.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A single derivation step. Hardened derivation mixes in the
/// parent private scalar and is therefore only available on
/// extended private keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32),
}

impl ChildOptions {
    /// The index as written in a path, without the hardened offset.
    pub fn index(&self) -> u32 {
        match self {
            ChildOptions::Normal(x) | ChildOptions::Hardened(x) => *x,
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }

    /// The index as serialized into the HMAC input: hardened
    /// indices live in the upper half of the u32 space. Fails if
    /// the plain index does not fit in 31 bits.
    pub fn raw_index(&self) -> Result<u32, HDWError> {
        let x = self.index();
        if x >= HARDENED_OFFSET {
            return Err(HDWError::IndexOutOfRange(x as u64));
        }
        Ok(match self {
            ChildOptions::Normal(_) => x,
            ChildOptions::Hardened(_) => x + HARDENED_OFFSET,
        })
    }
}

impl fmt::Display for ChildOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChildOptions::Normal(x) => write!(f, "{}", x),
            ChildOptions::Hardened(x) => write!(f, "{}'", x),
        }
    }
}

/// Derive a child extended private key.
///
/// Hardened children hash [0x00 || parent scalar || index],
/// normal children hash [parent compressed pubkey || index],
/// keyed in both cases by the parent chaincode. The left half of
/// the HMAC output is added to the parent scalar mod the curve
/// order; the right half becomes the child chaincode.
pub fn derive_xprv(parent: &Xprv, options: ChildOptions) -> Result<Xprv, HDWError> {
    if parent.depth == u8::MAX {
        return Err(HDWError::DepthOverflow);
    }
    let raw_index = options.raw_index()?;

    let mut data: Vec<u8> = match options {
        ChildOptions::Normal(_) => parent.public_key().as_bytes().to_vec(),
        ChildOptions::Hardened(_) => {
            let mut data = vec![0x00];
            data.extend_from_slice(&parent.key_bytes());
            data
        }
    };
    data.extend_from_slice(&raw_index.to_be_bytes());

    let hmac = hash::hmac_sha512(&data, &parent.chaincode());
    let (left, right) = split_hmac(&hmac);

    let child_key = parent
        .priv_key()
        .add_tweak(&left)
        .map_err(|_| HDWError::InvalidChildKey(options.index()))?;

    Ok(Xprv::construct(
        child_key,
        right,
        parent.depth + 1,
        parent.fingerprint(),
        raw_index,
    ))
}

/// Derive a child extended public key. Only normal children can
/// be derived without the parent private scalar.
pub fn derive_xpub(parent: &Xpub, options: ChildOptions) -> Result<Xpub, HDWError> {
    if options.is_hardened() {
        return Err(HDWError::PrivateKeyRequired);
    }
    if parent.depth == u8::MAX {
        return Err(HDWError::DepthOverflow);
    }
    let raw_index = options.raw_index()?;

    let mut data = parent.key_bytes().to_vec();
    data.extend_from_slice(&raw_index.to_be_bytes());

    let hmac = hash::hmac_sha512(&data, &parent.chaincode());
    let (left, right) = split_hmac(&hmac);

    let child_key = parent
        .pub_key()
        .add_exp_tweak(&left)
        .map_err(|_| HDWError::InvalidChildKey(options.index()))?;

    Ok(Xpub::construct(
        child_key,
        right,
        parent.depth + 1,
        parent.fingerprint(),
        raw_index,
    ))
}

fn split_hmac(hmac: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&hmac[0..32]);
    right.copy_from_slice(&hmac[32..64]);
    (left, right)
}
