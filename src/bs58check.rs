/*
    Base58Check encoding for extended key import and export.

    Payloads are prefixed with a version identifying the key
    kind and suffixed with the first four bytes of their double
    SHA256 as a transcription checksum.
*/

use crate::hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    Xprv,
    Xpub,
}

impl VersionPrefix {
    pub fn bytes(&self) -> [u8; 4] {
        match self {
            VersionPrefix::Xprv => [0x04, 0x88, 0xAD, 0xE4],
            VersionPrefix::Xpub => [0x04, 0x88, 0xB2, 0x1E],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bs58Error {
    BadChar(usize),
    BadChecksum,
    BadLength(usize),
}

/// Base58Check encode the payload under the given version prefix.
pub fn check_encode(prefix: VersionPrefix, payload: &[u8]) -> String {
    let mut data = prefix.bytes().to_vec();
    data.extend_from_slice(payload);

    let checksum = &hash::double_sha256(&data)[0..4];
    data.extend_from_slice(checksum);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string, validate and strip the trailing
/// checksum. The version prefix is left at the front of the
/// returned bytes for the caller to inspect.
pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Bs58Error> {
    let bytes = bs58::decode(encoded).into_vec().map_err(|e| match e {
        bs58::decode::Error::InvalidCharacter { index, .. } => Bs58Error::BadChar(index),
        bs58::decode::Error::NonAsciiCharacter { index } => Bs58Error::BadChar(index),
        _ => Bs58Error::BadChecksum,
    })?;

    if bytes.len() < 5 {
        return Err(Bs58Error::BadLength(bytes.len()));
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    if &hash::double_sha256(payload)[0..4] != checksum {
        return Err(Bs58Error::BadChecksum);
    }

    Ok(payload.to_vec())
}
