/*
    Secure entropy collection for new mnemonics.

    The codec never talks to an RNG directly. It asks an
    EntropySource for bytes so embedding applications can swap
    in their own provider (or a deterministic one in tests).
*/

use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    #[error("entropy source unavailable: {0}")]
    Unavailable(String),
}

/// A provider of cryptographically secure random bytes.
///
/// Implementations fill as much of `buf` as they can and report
/// the number of bytes written. Callers treat a short fill as
/// insufficient entropy and must not use the partial buffer.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError>;
}

/// Entropy drawn from the operating system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))?;
        Ok(buf.len())
    }
}
