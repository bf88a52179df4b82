//! Built-in phonetic variants.
//!
//! | Identifier      | Variant                                   |
//! |-----------------|-------------------------------------------|
//! | `eng`, `eng-us` | American Soundex classes                  |
//! | `kre`           | Haitian Creole (accented vowels, glides)  |
//! | `syl`           | Sylheti (vowel-height and voicing classes)|

use crate::error::{OrthoError, Result};
use crate::phonetic::ruleset::{ApplyOrder, CharacterClass, ClassRole, RuleSet};

/// Identifiers accepted by [`rules_for`].
pub const SUPPORTED_LANGUAGES: &[&str] = &["eng", "eng-us", "kre", "syl"];

type ClassSpec = (&'static str, &'static str, &'static str, ClassRole);

const AMERICAN: &[ClassSpec] = &[
    ("Numeric", "X", "0123456789", ClassRole::Numeric),
    ("Open", "", "hwy", ClassRole::Substitution),
    ("Labial", "1", "bfpv", ClassRole::Substitution),
    ("Palatovelar", "2", "cgjkqsxz", ClassRole::Substitution),
    ("Alveolar", "3", "dt", ClassRole::Substitution),
    ("Lateral", "4", "l", ClassRole::Substitution),
    ("Nasal", "5", "mn", ClassRole::Substitution),
    ("Rhotic", "6", "r", ClassRole::Substitution),
    ("Vocalic", "", "aeiou", ClassRole::Vocalic),
];

const HAITIAN_CREOLE: &[ClassSpec] = &[
    ("Numeric", "X", "0123456789", ClassRole::Numeric),
    ("Labial", "1", "bfpv", ClassRole::Substitution),
    ("Velar", "2", "cgjkq", ClassRole::Substitution),
    ("Palatal", "3", "sxz", ClassRole::Substitution),
    ("Alveolar", "4", "dt", ClassRole::Substitution),
    ("Lateral", "5", "l", ClassRole::Substitution),
    ("Nasal", "6", "mn", ClassRole::Substitution),
    ("Glide", "7", "rwy", ClassRole::Substitution),
    (
        "Vocalic",
        "",
        "aehiouáéíóúàèìòùâêîôû",
        ClassRole::Vocalic,
    ),
];

// Letters outside these classes stay as they are.
const SYLHETI: &[ClassSpec] = &[
    ("FrontVowel", "1", "eiy", ClassRole::Substitution),
    ("BackVowel", "2", "ouw", ClassRole::Substitution),
    ("LowVowel", "3", "a", ClassRole::Substitution),
    ("LabialVoiced", "4", "bv", ClassRole::Substitution),
    ("LabialVoiceless", "5", "pf", ClassRole::Substitution),
    ("AlveolarVoiced", "6", "jz", ClassRole::Substitution),
    ("AlveolarVoiceless", "7", "cs", ClassRole::Substitution),
];

fn build(language: &str, order: ApplyOrder, specs: &[ClassSpec]) -> RuleSet {
    specs
        .iter()
        .fold(RuleSet::new(language, order), |rules, &(name, repl, members, role)| {
            rules.with_class(CharacterClass::new(name, repl, members, role))
        })
}

/// American Soundex classes.
pub fn american() -> RuleSet {
    build("eng", ApplyOrder::Sequential, AMERICAN)
}

/// Haitian Creole classes.
pub fn haitian_creole() -> RuleSet {
    build("kre", ApplyOrder::Sequential, HAITIAN_CREOLE)
}

/// Sylheti classes.
pub fn sylheti() -> RuleSet {
    build("syl", ApplyOrder::Unordered, SYLHETI)
}

/// Look up the built-in rule set for a language identifier.
pub fn rules_for(language: &str) -> Result<RuleSet> {
    match language {
        "eng" | "eng-us" => Ok(american()),
        "kre" => Ok(haitian_creole()),
        "syl" => Ok(sylheti()),
        other => Err(OrthoError::unsupported_language(other)),
    }
}
