//! The shared encoding skeleton, driven by a [`RuleSet`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::phonetic::languages::rules_for;
use crate::phonetic::ruleset::{ClassRole, RuleSet};

/// Default number of characters copied verbatim before encoding.
pub const DEFAULT_PREFIX_LENGTH: usize = 1;

/// Default length of a phonetic code.
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Character used to right-pad short codes.
pub const PADDING: char = '0';

/// Configuration for building a [`PhoneticEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Identifier of a built-in rule set.
    pub language: String,
    /// Characters copied verbatim before encoding.
    pub prefix_length: usize,
    /// Exact length of every produced code.
    pub code_length: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            language: "eng".to_string(),
            prefix_length: DEFAULT_PREFIX_LENGTH,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// One class, ready to apply.
#[derive(Debug, Clone)]
struct CompiledClass {
    members: HashSet<char>,
    replacement: Option<char>,
}

/// A character of the word being encoded.
///
/// `Coded` characters were produced by a class and are never matched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Raw(char),
    Coded(char),
}

impl Slot {
    fn symbol(self) -> char {
        match self {
            Slot::Raw(c) | Slot::Coded(c) => c,
        }
    }
}

impl CompiledClass {
    fn apply(&self, slots: Vec<Slot>) -> Vec<Slot> {
        slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Raw(c) if self.members.contains(&c) => self.replacement.map(Slot::Coded),
                other => Some(other),
            })
            .collect()
    }
}

/// Phonetic encoder for one language variant.
///
/// Immutable once built; `encode` is a pure function of its input.
#[derive(Debug, Clone)]
pub struct PhoneticEncoder {
    language: String,
    numeric: Vec<CompiledClass>,
    substitutions: Vec<CompiledClass>,
    vocalic: Vec<CompiledClass>,
    prefix_length: usize,
    code_length: usize,
}

impl PhoneticEncoder {
    /// Build an encoder from a rule set with the default prefix and code lengths.
    ///
    /// The rule set is validated here, so a malformed table fails before any
    /// word is encoded.
    pub fn new(rules: &RuleSet) -> Result<Self> {
        rules.validate()?;

        let compile = |role: ClassRole| -> Result<Vec<CompiledClass>> {
            rules
                .classes_with_role(role)
                .map(|class| {
                    Ok(CompiledClass {
                        members: class.members.chars().collect(),
                        replacement: class.replacement_char()?,
                    })
                })
                .collect()
        };

        Ok(PhoneticEncoder {
            language: rules.language.clone(),
            numeric: compile(ClassRole::Numeric)?,
            substitutions: compile(ClassRole::Substitution)?,
            vocalic: compile(ClassRole::Vocalic)?,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            code_length: DEFAULT_CODE_LENGTH,
        })
    }

    /// Build the encoder for a built-in language identifier.
    pub fn for_language(language: &str) -> Result<Self> {
        Self::new(&rules_for(language)?)
    }

    /// Build an encoder from a configuration value.
    pub fn from_config(config: &EncoderConfig) -> Result<Self> {
        Ok(Self::for_language(&config.language)?
            .with_prefix_length(config.prefix_length)
            .with_code_length(config.code_length))
    }

    /// Set the number of characters copied verbatim.
    pub fn with_prefix_length(mut self, prefix_length: usize) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    /// Set the output code length.
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Encode a word to its phonetic code.
    ///
    /// The result always has exactly `code_length` characters.
    pub fn encode(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        let mut chars = lowered.chars();
        let prefix: String = chars.by_ref().take(self.prefix_length).collect();
        let mut slots: Vec<Slot> = chars.map(Slot::Raw).collect();

        for class in self.numeric.iter().chain(&self.substitutions) {
            slots = class.apply(slots);
        }

        slots.dedup_by_key(|slot| slot.symbol());

        for class in &self.vocalic {
            slots = class.apply(slots);
        }

        let mut code = prefix;
        code.extend(slots.into_iter().map(Slot::symbol));
        force_length(&code, self.code_length)
    }

    /// 0 when both words share a phonetic code, 1 otherwise.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        usize::from(self.encode(a) != self.encode(b))
    }
}

/// Truncate to `length` characters, then right-pad with [`PADDING`].
fn force_length(code: &str, length: usize) -> String {
    let mut out: String = code.chars().take(length).collect();
    let missing = length - out.chars().count();
    out.extend(std::iter::repeat_n(PADDING, missing));
    out
}
