/*
    Extended keys as used in BIP-32 hierarchical deterministic
    wallets. An extended key couples 32 bytes of key material
    (or a 33 byte compressed point) with a 32 byte chaincode
    plus the metadata describing its place in the hierarchy.

    Extended keys are immutable; derivation always produces a
    new value.
*/

use crate::{
    bip39::Mnemonic,
    bs58check::{self, Bs58Error, VersionPrefix},
    hash,
    hdwallet::{
        ckd::{derive_xprv, derive_xpub, ChildOptions},
        HDWError, Path,
    },
    key::{PrivKey, PubKey},
};
use std::fmt;
use std::str::FromStr;

//Fixed HMAC key for master key generation, per BIP-32
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

//depth(1) + fingerprint(4) + index(4) + chaincode(32) + key(33)
const SERIALIZED_LEN: usize = 78;

/// Common behaviour of extended private and public keys.
pub trait ExtendedKey: Sized + Clone {
    fn chaincode(&self) -> [u8; 32];
    fn depth(&self) -> u8;
    fn parent_fingerprint(&self) -> [u8; 4];
    fn index(&self) -> u32;

    /// The public point of this node.
    fn public_key(&self) -> PubKey;

    /// Derive the child of self described by the options.
    fn get_xchild(&self, options: ChildOptions) -> Result<Self, HDWError>;

    /// Base58Check export ("xprv..." / "xpub...").
    fn serialize(&self) -> String;

    /// First four bytes of hash160 of the compressed public key.
    /// Identifies this node as a parent in its children.
    fn fingerprint(&self) -> [u8; 4] {
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&hash::hash160(self.public_key().as_bytes())[0..4]);
        fp
    }

    /// Walk a derivation path from self, one child at a time.
    /// The first failing segment is attached to the error.
    fn derive_from_path(&self, path: &Path) -> Result<Self, HDWError> {
        let mut current = self.clone();
        for (segment, child) in path.children.iter().enumerate() {
            current = current
                .get_xchild(*child)
                .map_err(|e| HDWError::DerivationFailed {
                    segment,
                    source: Box::new(e),
                })?;
        }
        Ok(current)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xprv {
    key: PrivKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xpub {
    key: PubKey,
    chaincode: [u8; 32],
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: u32,
}

impl Xprv {
    pub(crate) fn construct(
        key: PrivKey,
        chaincode: [u8; 32],
        depth: u8,
        parent_fingerprint: [u8; 4],
        index: u32,
    ) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint,
            index,
        }
    }

    /// The master extended private key for a seed of 16 to 64
    /// bytes (mnemonic stretching always yields 64).
    ///
    /// HMAC-SHA512 over the seed keyed with "Bitcoin seed"; the
    /// left half becomes the master scalar and the right half the
    /// chaincode. Fails with InvalidMasterKey on an out of range
    /// seed length or, astronomically rarely, when the left half
    /// is not a valid scalar; the remedy is a different seed.
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Result<Self, HDWError> {
        let seed = seed.as_ref();
        if seed.len() < 16 || seed.len() > 64 {
            return Err(HDWError::InvalidMasterKey);
        }
        let hmac = hash::hmac_sha512(seed, MASTER_KEY_DOMAIN);

        let key = PrivKey::from_slice(&hmac[0..32]).map_err(|_| HDWError::InvalidMasterKey)?;
        let mut chaincode = [0u8; 32];
        chaincode.copy_from_slice(&hmac[32..64]);

        Ok(Self::construct(key, chaincode, 0, [0u8; 4], 0))
    }

    /// Stretch a validated mnemonic and passphrase into the
    /// master extended private key.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Result<Self, HDWError> {
        Self::from_seed(&mnemonic.to_seed(passphrase))
    }

    /// The private scalar bytes.
    pub fn key_bytes(&self) -> [u8; 32] {
        self.key.as_bytes()
    }

    pub(crate) fn priv_key(&self) -> PrivKey {
        self.key
    }

    /// The corresponding extended public key (same chaincode and
    /// lineage, private scalar replaced by its public point).
    pub fn to_xpub(&self) -> Xpub {
        Xpub::construct(
            PubKey::from_priv_key(&self.key),
            self.chaincode,
            self.depth,
            self.parent_fingerprint,
            self.index,
        )
    }
}

impl Xpub {
    pub(crate) fn construct(
        key: PubKey,
        chaincode: [u8; 32],
        depth: u8,
        parent_fingerprint: [u8; 4],
        index: u32,
    ) -> Self {
        Self {
            key,
            chaincode,
            depth,
            parent_fingerprint,
            index,
        }
    }

    /// The compressed public point bytes.
    pub fn key_bytes(&self) -> [u8; 33] {
        self.key.as_bytes()
    }

    pub(crate) fn pub_key(&self) -> PubKey {
        self.key
    }
}

impl ExtendedKey for Xprv {
    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn depth(&self) -> u8 {
        self.depth
    }

    fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn public_key(&self) -> PubKey {
        PubKey::from_priv_key(&self.key)
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Self, HDWError> {
        derive_xprv(self, options)
    }

    fn serialize(&self) -> String {
        let mut payload: Vec<u8> = Vec::with_capacity(SERIALIZED_LEN - 4);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.index.to_be_bytes());
        payload.extend_from_slice(&self.chaincode);
        payload.push(0x00); //private keys are padded to 33 bytes
        payload.extend_from_slice(&self.key_bytes());

        bs58check::check_encode(VersionPrefix::Xprv, &payload)
    }
}

impl ExtendedKey for Xpub {
    fn chaincode(&self) -> [u8; 32] {
        self.chaincode
    }

    fn depth(&self) -> u8 {
        self.depth
    }

    fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn public_key(&self) -> PubKey {
        self.key
    }

    fn get_xchild(&self, options: ChildOptions) -> Result<Self, HDWError> {
        derive_xpub(self, options)
    }

    fn serialize(&self) -> String {
        let mut payload: Vec<u8> = Vec::with_capacity(SERIALIZED_LEN - 4);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.index.to_be_bytes());
        payload.extend_from_slice(&self.chaincode);
        payload.extend_from_slice(&self.key_bytes());

        bs58check::check_encode(VersionPrefix::Xpub, &payload)
    }
}

//Shared import plumbing: decode, validate the checksum and
//version prefix, and split the payload into its fields.
fn decode_serialized(s: &str, expected: VersionPrefix) -> Result<Vec<u8>, HDWError> {
    let bytes = bs58check::check_decode(s).map_err(|e| match e {
        Bs58Error::BadChar(i) => HDWError::BadChar(i),
        Bs58Error::BadChecksum => HDWError::BadChecksum,
        Bs58Error::BadLength(_) => HDWError::BadKey,
    })?;

    if bytes.len() != SERIALIZED_LEN {
        return Err(HDWError::BadKey);
    }
    if bytes[0..4] != expected.bytes() {
        return Err(HDWError::BadPrefix(bytes[0..4].to_vec()));
    }

    Ok(bytes)
}

fn split_fields(bytes: &[u8]) -> (u8, [u8; 4], u32, [u8; 32]) {
    let depth = bytes[4];
    let mut fingerprint = [0u8; 4];
    fingerprint.copy_from_slice(&bytes[5..9]);
    let mut index = [0u8; 4];
    index.copy_from_slice(&bytes[9..13]);
    let mut chaincode = [0u8; 32];
    chaincode.copy_from_slice(&bytes[13..45]);

    (depth, fingerprint, u32::from_be_bytes(index), chaincode)
}

impl FromStr for Xprv {
    type Err = HDWError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_serialized(s, VersionPrefix::Xprv)?;
        let (depth, fingerprint, index, chaincode) = split_fields(&bytes);

        if bytes[45] != 0x00 {
            return Err(HDWError::BadKey);
        }
        let key = PrivKey::from_slice(&bytes[46..78]).map_err(|_| HDWError::BadKey)?;

        Ok(Self::construct(key, chaincode, depth, fingerprint, index))
    }
}

impl FromStr for Xpub {
    type Err = HDWError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_serialized(s, VersionPrefix::Xpub)?;
        let (depth, fingerprint, index, chaincode) = split_fields(&bytes);

        let key = PubKey::from_slice(&bytes[45..78]).map_err(|_| HDWError::BadKey)?;

        Ok(Self::construct(key, chaincode, depth, fingerprint, index))
    }
}

impl fmt::Display for Xprv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl fmt::Display for Xpub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}
