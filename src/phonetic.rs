//! Phonetic encoding of word-forms.
//!
//! Words are bucketed by a fixed-length Soundex-style code before any finer
//! comparison. Every language variant is a data-only [`RuleSet`] run through
//! the same [`PhoneticEncoder`] skeleton:
//!
//! 1. lower-case and split off a literal prefix,
//! 2. mask digits (numeric class),
//! 3. apply the substitution classes,
//! 4. collapse adjacent repeats,
//! 5. drop vocalic fillers,
//! 6. truncate or pad to the code length.
//!
//! # Examples
//!
//! ```
//! use orthocluster::phonetic::encode;
//!
//! assert_eq!(encode("Robert", "eng", 1, 4).unwrap(), "r163");
//! assert!(encode("Robert", "xx", 1, 4).is_err());
//! ```

pub mod encoder;
pub mod languages;
pub mod ruleset;

pub use encoder::*;
pub use languages::{SUPPORTED_LANGUAGES, rules_for};
pub use ruleset::*;

use crate::error::Result;

/// Encode a single word with a built-in language variant.
pub fn encode(
    word: &str,
    language: &str,
    prefix_length: usize,
    code_length: usize,
) -> Result<String> {
    let encoder = PhoneticEncoder::for_language(language)?
        .with_prefix_length(prefix_length)
        .with_code_length(code_length);
    Ok(encoder.encode(word))
}
