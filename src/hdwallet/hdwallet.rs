/*
    High level HD wallet facade tying the BIP-39 and BIP-32
    halves of the library together: create or restore a wallet
    from a mnemonic, then derive keys at string paths.
*/

use crate::{
    bip39::{Language, Mnemonic, PhraseLength},
    entropy::{EntropySource, OsEntropy},
    hdwallet::{ExtendedKey, HDWError, Hierarchy, Path, Xprv, Xpub},
};

/// A wallet rooted in a mnemonic phrase. Derivations run through
/// a caching [`Hierarchy`] so repeated lookups under the same
/// account stay cheap.
#[derive(Debug)]
pub struct HDWallet {
    mnemonic: Mnemonic,
    hierarchy: Hierarchy,
}

impl HDWallet {
    /// Create a new wallet from a freshly generated mnemonic,
    /// sourcing entropy from the operating system.
    pub fn generate(
        length: PhraseLength,
        lang: Language,
        passphrase: &str,
    ) -> Result<Self, HDWError> {
        Self::generate_with(length, lang, passphrase, &mut OsEntropy)
    }

    /// Like [`HDWallet::generate`] but with a caller supplied
    /// entropy source.
    pub fn generate_with(
        length: PhraseLength,
        lang: Language,
        passphrase: &str,
        entropy: &mut dyn EntropySource,
    ) -> Result<Self, HDWError> {
        let mnemonic = Mnemonic::new(length, lang, entropy)?;
        Self::from_mnemonic(mnemonic, passphrase)
    }

    /// Restore a wallet from an existing mnemonic phrase.
    pub fn from_phrase(phrase: &str, lang: Language, passphrase: &str) -> Result<Self, HDWError> {
        let mnemonic = Mnemonic::from_phrase(phrase, lang)?;
        Self::from_mnemonic(mnemonic, passphrase)
    }

    pub fn from_mnemonic(mnemonic: Mnemonic, passphrase: &str) -> Result<Self, HDWError> {
        let master = Xprv::from_mnemonic(&mnemonic, passphrase)?;
        Ok(Self {
            mnemonic,
            hierarchy: Hierarchy::new(master),
        })
    }

    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    pub fn master_private_key(&self) -> Xprv {
        *self.hierarchy.root()
    }

    pub fn master_public_key(&self) -> Xpub {
        self.hierarchy.root().to_xpub()
    }

    /// Derive the key at a string path such as "m/44'/0'/0'/0".
    pub fn derive_at(&mut self, path: &str) -> Result<DerivedKey, HDWError> {
        let path: Path = path.parse()?;
        let xprv = self.hierarchy.derive(&path)?;
        Ok(DerivedKey { xprv, path })
    }
}

/// A key derived by a wallet, carrying the path it was derived
/// along.
#[derive(Debug, Clone)]
pub struct DerivedKey {
    xprv: Xprv,
    path: Path,
}

impl DerivedKey {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn xprv(&self) -> &Xprv {
        &self.xprv
    }

    pub fn to_xpub(&self) -> Xpub {
        self.xprv.to_xpub()
    }

    pub fn key_bytes(&self) -> [u8; 32] {
        self.xprv.key_bytes()
    }

    pub fn chaincode(&self) -> [u8; 32] {
        self.xprv.chaincode()
    }

    pub fn serialize(&self) -> String {
        self.xprv.serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::EntropyError;

    const TEST_PHRASE: &str =
        "glow laugh acquire menu anchor evil occur put hover renew calm purpose";

    struct FixedEntropy(Vec<u8>);

    impl EntropySource for FixedEntropy {
        fn fill(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError> {
            let n = buf.len().min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            Ok(n)
        }
    }

    #[test]
    fn restores_reference_wallet_from_phrase() {
        let wallet = HDWallet::from_phrase(TEST_PHRASE, Language::English, "").unwrap();
        assert_eq!(
            hex::encode(wallet.master_private_key().key_bytes()),
            "081549973bafbba825b31bcc402a3c4ed8e3185c2f3a31c75e55f423e9629aa3"
        );
        assert_eq!(
            hex::encode(wallet.master_private_key().chaincode()),
            "1d7d2a4c940be028b945302ad79dd2ce2afe5ed55e1a2937a5af57f8401e73dd"
        );
    }

    #[test]
    fn derives_reference_keys_at_string_paths() {
        let mut wallet = HDWallet::from_phrase(TEST_PHRASE, Language::English, "").unwrap();

        let key = wallet.derive_at("m/44'/0'/0'/182").unwrap();
        assert_eq!(
            hex::encode(key.key_bytes()),
            "449c7e3758242480035df0010374c091e65438cb627d4bd90a0b882be8fb67c0"
        );
        assert_eq!(
            hex::encode(key.chaincode()),
            "830874009721f565ed288dd94f71e8e96b03e3e991831a4410c6a2d7eeab4e71"
        );
        assert_eq!(key.xprv().depth(), 4);
        assert_eq!(key.path().to_string(), "m/44'/0'/0'/182");

        let key = wallet.derive_at("m/44'/0'/0'/0").unwrap();
        assert_eq!(
            key.serialize(),
            "xprvA2RVpXN1QL4okLkV3NT6ADt7UcqauZdi6Tyv2wBscQ3kq9zvvfsxBBgQTcoj7GZCa7wkmmeLvQHdqVJEQ1D4PGoDgYV8CZj9w9jqGNbGCaT"
        );
        assert_eq!(
            key.to_xpub().serialize(),
            "xpub6FQrE2tuEhd6xppx9Pz6XMpr2eg5K2MZTguWqKbVAjajhxL5UDCCiyztJtCFDrAqPoQfmbVeVX5BKXQ7vxgR42DtsVa3g2YMLZQjbEnxbqi"
        );
    }

    #[test]
    fn generated_wallet_is_restorable_from_its_phrase() {
        let mut entropy = FixedEntropy(vec![0x7f; 16]);
        let wallet = HDWallet::generate_with(
            PhraseLength::Twelve,
            Language::English,
            "hunter2",
            &mut entropy,
        )
        .unwrap();
        assert_eq!(
            wallet.mnemonic().phrase(),
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );

        let restored =
            HDWallet::from_phrase(&wallet.mnemonic().phrase(), Language::English, "hunter2")
                .unwrap();
        assert_eq!(
            restored.master_private_key().serialize(),
            wallet.master_private_key().serialize()
        );
    }

    #[test]
    fn passphrase_changes_every_derived_key() {
        let mut plain = HDWallet::from_phrase(TEST_PHRASE, Language::English, "").unwrap();
        let mut protected = HDWallet::from_phrase(TEST_PHRASE, Language::English, "secret").unwrap();

        assert_ne!(
            plain.master_private_key().key_bytes(),
            protected.master_private_key().key_bytes()
        );
        assert_ne!(
            plain.derive_at("m/0").unwrap().key_bytes(),
            protected.derive_at("m/0").unwrap().key_bytes()
        );
    }

    #[test]
    fn wallet_types_are_debug_formattable() {
        //Results holding these types must unwrap in tests
        let mut wallet = HDWallet::from_phrase(TEST_PHRASE, Language::English, "").unwrap();
        let key = wallet.derive_at("m/0").unwrap();
        assert!(!format!("{:?}", wallet).is_empty());
        assert!(!format!("{:?}", key).is_empty());
    }

    #[test]
    fn bad_paths_and_bad_phrases_surface_errors() {
        let mut wallet = HDWallet::from_phrase(TEST_PHRASE, Language::English, "").unwrap();
        assert!(matches!(
            wallet.derive_at("m/abc").unwrap_err(),
            HDWError::InvalidPathSyntax(_)
        ));

        assert!(matches!(
            HDWallet::from_phrase("glow laugh acquire", Language::English, "").unwrap_err(),
            HDWError::Mnemonic(_)
        ));
    }
}
