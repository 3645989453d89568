/*
    This module implements the BIP-39 standard for mnemonic
    phrases: encoding entropy as a checksummed word sequence,
    decoding and verifying phrases, and stretching a phrase
    into a 64 byte seed.
*/

pub mod lang;
mod mnemonic;

pub use lang::{Language, WordList};
pub use mnemonic::{Mnemonic, PhraseLength, Seed};

use crate::entropy::EntropyError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicErr {
    #[error("invalid entropy length: {0} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropyLength(usize),
    #[error("invalid word count: {0} (expected 12, 15, 18, 21 or 24)")]
    InvalidWordCount(usize),
    #[error("word '{0}' is not in the dictionary")]
    UnknownWord(String),
    #[error("embedded checksum does not match the entropy")]
    ChecksumMismatch,
    #[error("wordlist dictionary could not be loaded: {0}")]
    DictionaryLoadError(String),
    #[error("entropy source returned {returned} of {requested} requested bytes")]
    InsufficientEntropy { requested: usize, returned: usize },
    #[error(transparent)]
    EntropySource(#[from] EntropyError),
}
