/*
    Wordlist dictionaries for mnemonic phrases.

    A dictionary maps 11 bit groups to words and back. The
    embedded English list is parsed and validated once on first
    use and shared across threads; it is never reloaded.
*/

use crate::bip39::MnemonicErr;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const WORD_COUNT: usize = 2048;

static ENGLISH: Lazy<Result<WordList, MnemonicErr>> =
    Lazy::new(|| WordList::parse(include_str!("english.txt")));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
}

impl Language {
    /// The canonical wordlist for this language. The embedded
    /// resource is validated on first access; a malformed list
    /// surfaces as DictionaryLoadError rather than a panic.
    pub fn word_list(&self) -> Result<&'static WordList, MnemonicErr> {
        match self {
            Language::English => ENGLISH.as_ref().map_err(|e| e.clone()),
        }
    }
}

/// An immutable, ordered dictionary of exactly 2048 unique words.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl WordList {
    /// Parse a newline separated UTF-8 word resource. The list
    /// must contain exactly 2048 non-empty, unique entries with
    /// no embedded whitespace.
    pub fn parse(src: &str) -> Result<Self, MnemonicErr> {
        let mut words: Vec<String> = Vec::with_capacity(WORD_COUNT);
        let mut index: HashMap<String, u16> = HashMap::with_capacity(WORD_COUNT);

        for (line_no, line) in src.lines().enumerate() {
            let word = line.trim();
            if word.is_empty() || word.contains(char::is_whitespace) {
                return Err(MnemonicErr::DictionaryLoadError(format!(
                    "malformed entry on line {}",
                    line_no + 1
                )));
            }
            if index.insert(word.to_string(), words.len() as u16).is_some() {
                return Err(MnemonicErr::DictionaryLoadError(format!(
                    "duplicate word '{}' on line {}",
                    word,
                    line_no + 1
                )));
            }
            words.push(word.to_string());
        }

        if words.len() != WORD_COUNT {
            return Err(MnemonicErr::DictionaryLoadError(format!(
                "expected {} words, found {}",
                WORD_COUNT,
                words.len()
            )));
        }

        Ok(Self { words, index })
    }

    /// The word at a dictionary index. Indices come from 11 bit
    /// groups and therefore always fit the 2048 entry list.
    pub fn word(&self, index: u16) -> &str {
        &self.words[index as usize]
    }

    /// The dictionary index of a word, if present.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_english_list_is_valid() {
        let list = Language::English.word_list().unwrap();
        assert_eq!(list.word(0), "abandon");
        assert_eq!(list.word(2047), "zoo");
        assert_eq!(list.index_of("zoo"), Some(2047));
        assert_eq!(list.index_of("notaword"), None);
    }

    #[test]
    fn rejects_wrong_word_count() {
        let err = WordList::parse("alpha\nbeta\ngamma\n").unwrap_err();
        assert!(matches!(err, MnemonicErr::DictionaryLoadError(_)));
    }

    #[test]
    fn rejects_duplicates_and_malformed_entries() {
        let dup = "alpha\n".repeat(2048);
        assert!(matches!(
            WordList::parse(&dup).unwrap_err(),
            MnemonicErr::DictionaryLoadError(_)
        ));

        let mut src = String::from("two words\n");
        src.push_str(&"filler\n".repeat(2047));
        assert!(matches!(
            WordList::parse(&src).unwrap_err(),
            MnemonicErr::DictionaryLoadError(_)
        ));
    }
}
