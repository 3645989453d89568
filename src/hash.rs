/*
    Hash module wrapping the digest primitives used by the
    mnemonic codec and child key derivation.
*/

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

type HmacSha512 = Hmac<Sha512>;

/// Single round of SHA256.
pub fn sha256<T: AsRef<[u8]>>(input: T) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// Double round of SHA256. Used for Base58Check checksums.
pub fn double_sha256<T: AsRef<[u8]>>(input: T) -> [u8; 32] {
    Sha256::digest(Sha256::digest(input)).into()
}

/// RIPEMD160 of SHA256. Used for extended key fingerprints.
pub fn hash160<T: AsRef<[u8]>>(input: T) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(input)).into()
}

/// HMAC-SHA512 of the data under the given key.
pub fn hmac_sha512(data: &[u8], key: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// PBKDF2 keyed with HMAC-SHA512. Used to stretch a mnemonic
/// phrase and passphrase into a 64 byte seed.
pub fn pbkdf2_hmac_sha512(password: &[u8], salt: &[u8], rounds: u32) -> [u8; 64] {
    let mut out = [0u8; 64];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, &mut out);
    out
}
