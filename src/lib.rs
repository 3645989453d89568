/*
    Library to derive hierarchical deterministic keys
    from mnemonic seed phrases.

    Implements the BIP-39 mnemonic encoding (entropy to seed
    phrase and back, plus seed stretching) and BIP-32 extended
    key derivation (master key from seed, hardened and normal
    child keys, path based derivation).

    References:
        - BIP-32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
        - BIP-39 (https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki)
        - The Bitcoin Book (https://github.com/bitcoinbook/bitcoinbook/)
          for the general concepts behind HD wallets.
*/

//Outward facing modules
pub mod bip39;
pub mod entropy;
pub mod hdwallet;

pub mod key;

//Modules for internal use
mod bs58check;
mod hash;

pub use bip39::{Language, Mnemonic, MnemonicErr, PhraseLength, Seed, WordList};
pub use entropy::{EntropyError, EntropySource, OsEntropy};
pub use hdwallet::{
    ChildOptions, DerivedKey, ExtendedKey, HDWError, HDWallet, Hierarchy, Path, Xprv, Xpub,
};
