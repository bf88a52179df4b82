//! Corpus ingestion: tokenization and word frequency tables.
//!
//! Text is split on Unicode word boundaries (UAX #29) after `@handle`
//! mentions are removed. Segments without a letter or digit (punctuation,
//! symbols, emoji) are dropped; the rest are lower-cased and stripped of
//! punctuation, and whatever remains is a word-form.
//!
//! # Examples
//!
//! ```
//! use orthocluster::corpus::CorpusTokenizer;
//!
//! let tokenizer = CorpusTokenizer::new().unwrap();
//! let table = tokenizer.count_reader("Color, colour! @someone COLOR?".as_bytes()).unwrap();
//! assert_eq!(table.count("color"), Some(2));
//! assert_eq!(table.count("colour"), Some(1));
//! assert_eq!(table.count("someone"), None);
//! ```

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use ahash::AHashMap;
use log::debug;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{OrthoError, Result};

/// Pattern of social-media mentions dropped before tokenization.
const MENTION_PATTERN: &str = r"@[a-zA-Z0-9_]+";

/// Characters stripped from a segment during normalization.
const PUNCTUATION_PATTERN: &str = r"[\p{P}\s[:punct:]]+";

/// Splits raw text into normalized word-forms.
#[derive(Debug, Clone)]
pub struct CorpusTokenizer {
    mention: Regex,
    punctuation: Regex,
}

impl CorpusTokenizer {
    pub fn new() -> Result<Self> {
        let compile =
            |pattern: &str| Regex::new(pattern).map_err(|e| OrthoError::Anyhow(anyhow::Error::from(e)));
        Ok(CorpusTokenizer {
            mention: compile(MENTION_PATTERN)?,
            punctuation: compile(PUNCTUATION_PATTERN)?,
        })
    }

    /// Word-forms of `text`, in order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.mention.replace_all(text, "");
        cleaned
            .split_word_bounds()
            .filter(|segment| segment.chars().any(char::is_alphanumeric))
            .map(|segment| self.normalize(segment))
            .filter(|word| !word.is_empty())
            .collect()
    }

    /// Lower-case and strip punctuation (any script) and whitespace.
    pub fn normalize(&self, word: &str) -> String {
        self.punctuation
            .replace_all(&word.to_lowercase(), "")
            .into_owned()
    }

    /// Tokenize `text` and count every word-form into `table`.
    pub fn count_text(&self, table: &mut FrequencyTable, text: &str) {
        for word in self.tokenize(text) {
            table.add_word(&word);
        }
    }

    /// Tokenize every line of `reader` into a new table.
    pub fn count_reader<R: Read>(&self, reader: R) -> Result<FrequencyTable> {
        let mut table = FrequencyTable::new();
        for line in BufReader::new(reader).lines() {
            self.count_text(&mut table, &line?);
        }
        debug!("Read {} distinct word-forms", table.len());
        Ok(table)
    }

    /// Tokenize a corpus file into a new table.
    pub fn count_path<P: AsRef<Path>>(&self, path: P) -> Result<FrequencyTable> {
        self.count_reader(File::open(path)?)
    }

    /// Word-forms of a word list (for example a spellcheck dictionary).
    pub fn read_word_set<P: AsRef<Path>>(&self, path: P) -> Result<BTreeSet<String>> {
        let mut words = BTreeSet::new();
        for line in BufReader::new(File::open(path)?).lines() {
            words.extend(self.tokenize(&line?));
        }
        Ok(words)
    }
}


/// Occurrence counts of word-forms.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: AHashMap<String, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        FrequencyTable {
            counts: AHashMap::new(),
        }
    }

    /// Build a table from explicit counts (already normalized words).
    pub fn from_counts<S: Into<String>>(counts: impl IntoIterator<Item = (S, u64)>) -> Self {
        let mut table = FrequencyTable::new();
        for (word, count) in counts {
            *table.counts.entry(word.into()).or_insert(0) += count;
        }
        table
    }

    /// Count one occurrence of an already normalized word.
    pub fn add_word(&mut self, word: &str) {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
    }

    /// Occurrences of `word`, `None` if it never occurred.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// All word-forms, in ascending order.
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_and_mentions() {
        let tokenizer = CorpusTokenizer::new().unwrap();
        let words = tokenizer.tokenize("@user_1 Bonjou, mezanmi! Kijan ou ye?");
        assert_eq!(words, vec!["bonjou", "mezanmi", "kijan", "ou", "ye"]);
    }

    #[test]
    fn test_tokenize_keeps_accents() {
        let tokenizer = CorpusTokenizer::new().unwrap();
        assert_eq!(tokenizer.tokenize("Mèsi anpil"), vec!["mèsi", "anpil"]);
    }

    #[test]
    fn test_tokenize_drops_typographic_punctuation_and_emoji() {
        let tokenizer = CorpusTokenizer::new().unwrap();
        let words = tokenizer.tokenize("“Bonjou” mezanmi… — 😀 «wi»");
        assert_eq!(words, vec!["bonjou", "mezanmi", "wi"]);

        let mut table = FrequencyTable::new();
        tokenizer.count_text(&mut table, "❤️ lakay ‘lakay’ ⭐");
        assert_eq!(table.len(), 1);
        assert_eq!(table.count("lakay"), Some(2));
    }

    #[test]
    fn test_normalize() {
        let tokenizer = CorpusTokenizer::new().unwrap();
        assert_eq!(tokenizer.normalize("Don't"), "dont");
        assert_eq!(tokenizer.normalize("Don’t"), "dont");
        assert_eq!(tokenizer.normalize("..."), "");
        assert_eq!(tokenizer.normalize("Mèsi"), "mèsi");
        assert_eq!(tokenizer.normalize("a+b=c"), "abc");
    }

    #[test]
    fn test_count_reader() {
        let tokenizer = CorpusTokenizer::new().unwrap();
        let text = "color colour\ncolor\n";
        let table = tokenizer.count_reader(text.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.count("color"), Some(2));
        assert_eq!(table.total(), 3);
        assert_eq!(table.words(), vec!["color", "colour"]);
    }

    #[test]
    fn test_from_counts_merges_duplicates() {
        let table = FrequencyTable::from_counts([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(table.count("a"), Some(4));
        assert_eq!(table.count("c"), None);
    }
}
