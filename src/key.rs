/*
    Thin wrappers around secp256k1 private scalars and public
    points. Key material is immutable once constructed and
    tweak additions return new keys.
*/

use once_cell::sync::Lazy;
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use std::fmt;

static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Errors surfaced by the curve library. Zero scalars, scalars
/// at or above the curve order and off curve points all land here.
pub type KeyError = secp256k1::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivKey(SecretKey);

impl PrivKey {
    /// Interpret 32 bytes as a private scalar. Fails on zero
    /// or values at or above the curve order.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self(SecretKey::from_slice(bytes)?))
    }

    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    /// (self + tweak) mod n. Fails if the tweak is not a valid
    /// scalar or if the sum is zero.
    pub fn add_tweak(&self, tweak: &[u8; 32]) -> Result<Self, KeyError> {
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidTweak)?;
        Ok(Self(self.0.add_tweak(&scalar)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PubKey(PublicKey);

impl PubKey {
    /// The public point for a private scalar.
    pub fn from_priv_key(k: &PrivKey) -> Self {
        Self(PublicKey::from_secret_key(&SECP, &k.0))
    }

    /// Interpret 33 bytes as a compressed public point.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self(PublicKey::from_slice(bytes)?))
    }

    /// Compressed serialization (1 byte parity prefix + x coordinate).
    pub fn as_bytes(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /// self + tweak*G. Fails if the tweak is not a valid scalar
    /// or if the sum is the point at infinity.
    pub fn add_exp_tweak(&self, tweak: &[u8; 32]) -> Result<Self, KeyError> {
        let scalar = Scalar::from_be_bytes(*tweak).map_err(|_| KeyError::InvalidTweak)?;
        Ok(Self(self.0.add_exp_tweak(&SECP, &scalar)?))
    }
}

impl fmt::Display for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_bytes()))
    }
}
