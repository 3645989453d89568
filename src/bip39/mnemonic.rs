use crate::{
    bip39::{Language, MnemonicErr},
    entropy::EntropySource,
    hash,
};
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

//Iteration count for the PBKDF2 seed stretch, fixed by BIP-39.
const PBKDF2_ROUNDS: u32 = 2048;

/// Supported phrase lengths. Each length corresponds to a fixed
/// entropy size plus a checksum of entropy_bits/32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseLength {
    Twelve,
    Fifteen,
    Eighteen,
    TwentyOne,
    TwentyFour,
}

impl PhraseLength {
    pub fn word_count(&self) -> usize {
        match self {
            PhraseLength::Twelve => 12,
            PhraseLength::Fifteen => 15,
            PhraseLength::Eighteen => 18,
            PhraseLength::TwentyOne => 21,
            PhraseLength::TwentyFour => 24,
        }
    }

    pub fn entropy_bytes(&self) -> usize {
        match self {
            PhraseLength::Twelve => 16,
            PhraseLength::Fifteen => 20,
            PhraseLength::Eighteen => 24,
            PhraseLength::TwentyOne => 28,
            PhraseLength::TwentyFour => 32,
        }
    }

    pub fn from_word_count(count: usize) -> Result<Self, MnemonicErr> {
        match count {
            12 => Ok(PhraseLength::Twelve),
            15 => Ok(PhraseLength::Fifteen),
            18 => Ok(PhraseLength::Eighteen),
            21 => Ok(PhraseLength::TwentyOne),
            24 => Ok(PhraseLength::TwentyFour),
            x => Err(MnemonicErr::InvalidWordCount(x)),
        }
    }
}

/// A checksummed mnemonic phrase together with the entropy it
/// encodes. Construction always validates, so a value of this
/// type is known to round trip.
///
/// The words and entropy are equivalent secrets; both are wiped
/// from memory on drop.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
    entropy: Vec<u8>,
    #[zeroize(skip)]
    lang: Language,
}

impl Mnemonic {
    /// Create a new mnemonic from fresh entropy drawn from the
    /// given source.
    pub fn new(
        length: PhraseLength,
        lang: Language,
        source: &mut dyn EntropySource,
    ) -> Result<Self, MnemonicErr> {
        let requested = length.entropy_bytes();
        let mut entropy = vec![0u8; requested];
        let returned = source.fill(&mut entropy)?;
        if returned < requested {
            entropy.zeroize();
            return Err(MnemonicErr::InsufficientEntropy {
                requested,
                returned,
            });
        }

        let mnemonic = Self::from_entropy(&entropy, lang);
        entropy.zeroize();
        mnemonic
    }

    /// Encode entropy as a mnemonic phrase. The entropy length
    /// must be 16, 20, 24, 28 or 32 bytes.
    pub fn from_entropy(entropy: &[u8], lang: Language) -> Result<Self, MnemonicErr> {
        let bits = entropy.len() * 8;
        if bits < 128 || bits > 256 || bits % 32 != 0 {
            return Err(MnemonicErr::InvalidEntropyLength(entropy.len()));
        }
        let checksum_bits = bits / 32;

        //Entropy bits followed by the leading checksum_bits of sha256(entropy)
        let mut bit_string: String = entropy.iter().map(|b| format!("{:08b}", b)).collect();
        let checksum = hash::sha256(entropy)[0] >> (8 - checksum_bits);
        bit_string.push_str(&format!("{:0width$b}", checksum, width = checksum_bits));

        //Each 11 bit group indexes one dictionary word
        let list = lang.word_list()?;
        let words = (0..bit_string.len())
            .step_by(11)
            .map(|i| list.word(index_from_bits(&bit_string[i..i + 11])).to_string())
            .collect();

        Ok(Self {
            words,
            entropy: entropy.to_vec(),
            lang,
        })
    }

    /// Decode and verify a phrase: every word must exist in the
    /// dictionary and the embedded checksum must match the
    /// checksum recomputed from the recovered entropy.
    pub fn from_phrase(phrase: &str, lang: Language) -> Result<Self, MnemonicErr> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let length = PhraseLength::from_word_count(words.len())?;
        let list = lang.word_list()?;

        let mut bit_string = String::with_capacity(words.len() * 11);
        for word in &words {
            match list.index_of(word) {
                Some(index) => bit_string.push_str(&format!("{:011b}", index)),
                None => return Err(MnemonicErr::UnknownWord(word.to_string())),
            }
        }

        //Split into entropy and checksum portions
        let checksum_bits = length.entropy_bytes() / 4;
        let (entropy_bits, embedded_checksum) =
            bit_string.split_at(bit_string.len() - checksum_bits);
        let entropy: Vec<u8> = (0..entropy_bits.len())
            .step_by(8)
            .map(|i| index_from_bits(&entropy_bits[i..i + 8]) as u8)
            .collect();

        let expected = hash::sha256(&entropy)[0] >> (8 - checksum_bits);
        if index_from_bits(embedded_checksum) != expected as u16 {
            return Err(MnemonicErr::ChecksumMismatch);
        }

        Ok(Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            entropy,
            lang,
        })
    }

    /// The entropy this phrase encodes.
    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The phrase with words joined by single spaces.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    /// Stretch the phrase and passphrase into a 64 byte seed via
    /// PBKDF2-HMAC-SHA512 with salt "mnemonic" + passphrase.
    ///
    /// No checksum validation happens here; constructing the
    /// Mnemonic already performed it.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        let password: String = self.phrase().nfkd().collect();
        let salt: String = format!("mnemonic{}", passphrase).nfkd().collect();

        Seed(hash::pbkdf2_hmac_sha512(
            password.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
        ))
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

/// A 512 bit seed produced by stretching a mnemonic. Wiped from
/// memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    //Seeds are secrets and never printed
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Seed(..)")
    }
}

fn index_from_bits(bits: &str) -> u16 {
    bits.bytes().fold(0u16, |acc, b| (acc << 1) | (b - b'0') as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{EntropyError, EntropySource, OsEntropy};

    //Reference vectors from the BIP-39 specification
    const ZERO_PHRASE_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const ZERO_SEED_12: &str =
        "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn reference_vectors_encode() {
        let cases: [(&[u8], &str); 4] = [
            (&[0x00; 16], ZERO_PHRASE_12),
            (
                &[0x7f; 16],
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                &[0x80; 16],
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            ),
            (
                &[0xff; 16],
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
        ];

        for (entropy, phrase) in cases {
            let mnemonic = Mnemonic::from_entropy(entropy, Language::English).unwrap();
            assert_eq!(mnemonic.phrase(), phrase);
        }
    }

    #[test]
    fn round_trip_all_entropy_lengths() {
        for len in [16, 20, 24, 28, 32] {
            let entropy: Vec<u8> = (0..len as u8).map(|i| i.wrapping_mul(7)).collect();
            let mnemonic = Mnemonic::from_entropy(&entropy, Language::English).unwrap();
            let decoded = Mnemonic::from_phrase(&mnemonic.phrase(), Language::English).unwrap();
            assert_eq!(decoded.entropy(), &entropy[..]);
        }
    }

    #[test]
    fn rejects_invalid_entropy_lengths() {
        for len in [0, 12, 17, 36] {
            assert_eq!(
                Mnemonic::from_entropy(&vec![0u8; len], Language::English).unwrap_err(),
                MnemonicErr::InvalidEntropyLength(len)
            );
        }
    }

    #[test]
    fn rejects_invalid_word_counts() {
        assert_eq!(
            Mnemonic::from_phrase("zoo zoo zoo", Language::English).unwrap_err(),
            MnemonicErr::InvalidWordCount(3)
        );
    }

    #[test]
    fn rejects_unknown_words() {
        let phrase = ZERO_PHRASE_12.replace("about", "aboot");
        assert_eq!(
            Mnemonic::from_phrase(&phrase, Language::English).unwrap_err(),
            MnemonicErr::UnknownWord("aboot".to_string())
        );
    }

    #[test]
    fn rejects_bad_checksum() {
        //Swapping the final word breaks the embedded checksum
        let phrase = ZERO_PHRASE_12.replace("about", "zoo");
        assert_eq!(
            Mnemonic::from_phrase(&phrase, Language::English).unwrap_err(),
            MnemonicErr::ChecksumMismatch
        );
    }

    #[test]
    fn checksum_is_bit_sensitive() {
        //Perturbing any single word of a valid phrase must not verify
        //against the original entropy; nearly all perturbations fail
        //the checksum outright.
        let phrase = "glow laugh acquire menu anchor evil occur put hover renew calm purpose";
        let entropy = Mnemonic::from_phrase(phrase, Language::English)
            .unwrap()
            .entropy()
            .to_vec();

        let mut words: Vec<&str> = phrase.split(' ').collect();
        for i in 0..words.len() {
            let original = words[i];
            words[i] = if original == "zoo" { "zebra" } else { "zoo" };
            match Mnemonic::from_phrase(&words.join(" "), Language::English) {
                Err(MnemonicErr::ChecksumMismatch) => {}
                Ok(decoded) => assert_ne!(decoded.entropy(), &entropy[..]),
                Err(e) => panic!("unexpected error: {}", e),
            }
            words[i] = original;
        }
    }

    #[test]
    fn zeroized_mnemonic_holds_no_secret_material() {
        let mut mnemonic = Mnemonic::from_phrase(ZERO_PHRASE_12, Language::English).unwrap();
        mnemonic.zeroize();
        assert!(mnemonic.entropy().is_empty());
        assert_eq!(mnemonic.word_count(), 0);
    }

    #[test]
    fn seed_stretching_reference_vectors() {
        let mnemonic = Mnemonic::from_phrase(ZERO_PHRASE_12, Language::English).unwrap();
        assert_eq!(hex::encode(mnemonic.to_seed("").as_bytes()), ZERO_SEED_12);
        assert_eq!(
            hex::encode(mnemonic.to_seed("TREZOR").as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn seed_stretching_is_deterministic() {
        let mnemonic = Mnemonic::from_phrase(ZERO_PHRASE_12, Language::English).unwrap();
        assert_eq!(mnemonic.to_seed("pass"), mnemonic.to_seed("pass"));
        assert_ne!(mnemonic.to_seed("pass"), mnemonic.to_seed("other"));
    }

    #[test]
    fn known_phrase_recovers_known_entropy() {
        //Generated on learnmeabitcoin.com/technical/hd-wallets
        let mnemonic = Mnemonic::from_phrase(
            "glow laugh acquire menu anchor evil occur put hover renew calm purpose",
            Language::English,
        )
        .unwrap();
        assert_eq!(
            hex::encode(mnemonic.entropy()),
            "63cfb008c590869be635766e76c48257"
        );
    }

    struct FixedEntropy(Vec<u8>);

    impl EntropySource for FixedEntropy {
        fn fill(&mut self, buf: &mut [u8]) -> Result<usize, EntropyError> {
            let n = self.0.len().min(buf.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            Ok(n)
        }
    }

    #[test]
    fn new_mnemonic_uses_the_supplied_source() {
        let mut source = FixedEntropy(vec![0u8; 16]);
        let mnemonic =
            Mnemonic::new(PhraseLength::Twelve, Language::English, &mut source).unwrap();
        assert_eq!(mnemonic.phrase(), ZERO_PHRASE_12);
    }

    #[test]
    fn short_entropy_source_is_rejected() {
        let mut source = FixedEntropy(vec![0u8; 8]);
        assert_eq!(
            Mnemonic::new(PhraseLength::Twelve, Language::English, &mut source).unwrap_err(),
            MnemonicErr::InsufficientEntropy {
                requested: 16,
                returned: 8
            }
        );
    }

    #[test]
    fn generated_phrases_have_requested_length() {
        let mut source = OsEntropy;
        for (length, count) in [
            (PhraseLength::Twelve, 12),
            (PhraseLength::Fifteen, 15),
            (PhraseLength::Eighteen, 18),
            (PhraseLength::TwentyOne, 21),
            (PhraseLength::TwentyFour, 24),
        ] {
            let mnemonic = Mnemonic::new(length, Language::English, &mut source).unwrap();
            assert_eq!(mnemonic.word_count(), count);
            //A fresh phrase always passes its own checksum
            Mnemonic::from_phrase(&mnemonic.phrase(), Language::English).unwrap();
        }
    }
}
