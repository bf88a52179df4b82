//! Data-only description of a phonetic encoding variant.
//!
//! A [`RuleSet`] is an ordered list of character classes. Each class names a
//! set of member characters and the single symbol they are rewritten to (or
//! nothing, to drop them). The [`ClassRole`] of a class decides in which
//! stage of the encoder it runs.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrthoError, Result};

/// Stage of the encoding algorithm a character class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassRole {
    /// Applied before everything else (digit masking).
    Numeric,
    /// Ordinary substitution class, applied in rule-set order.
    Substitution,
    /// Applied after adjacent duplicates are collapsed (filler removal).
    Vocalic,
}

/// How the substitution classes of a rule set are sequenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyOrder {
    /// Classes run strictly in the order they are listed.
    #[default]
    Sequential,
    /// The order carries no meaning; only legal for disjoint member sets.
    Unordered,
}

/// A set of characters treated as interchangeable, mapped to one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub name: String,
    /// Empty (drop members) or exactly one character.
    pub replacement: String,
    pub members: String,
    #[serde(default = "default_role")]
    pub role: ClassRole,
}

fn default_role() -> ClassRole {
    ClassRole::Substitution
}

impl CharacterClass {
    pub fn new(name: &str, replacement: &str, members: &str, role: ClassRole) -> Self {
        CharacterClass {
            name: name.to_string(),
            replacement: replacement.to_string(),
            members: members.to_string(),
            role,
        }
    }

    pub fn substitution(name: &str, replacement: &str, members: &str) -> Self {
        Self::new(name, replacement, members, ClassRole::Substitution)
    }

    pub fn numeric(name: &str, replacement: &str, members: &str) -> Self {
        Self::new(name, replacement, members, ClassRole::Numeric)
    }

    pub fn vocalic(name: &str, replacement: &str, members: &str) -> Self {
        Self::new(name, replacement, members, ClassRole::Vocalic)
    }

    /// The replacement as a single optional character.
    ///
    /// Fails with `InvalidEncodingRule` if the replacement is longer than one
    /// character.
    pub fn replacement_char(&self) -> Result<Option<char>> {
        let mut chars = self.replacement.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) => Ok(Some(c)),
            _ => Err(OrthoError::invalid_rule(format!(
                "class '{}' has replacement '{}'; it must be empty or exactly one character",
                self.name, self.replacement
            ))),
        }
    }
}

/// A complete phonetic variant: its identifier, classes and sequencing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub language: String,
    pub classes: Vec<CharacterClass>,
    #[serde(default)]
    pub order: ApplyOrder,
}

impl RuleSet {
    pub fn new(language: &str, order: ApplyOrder) -> Self {
        RuleSet {
            language: language.to_string(),
            classes: Vec::new(),
            order,
        }
    }

    /// Append a class (builder style).
    pub fn with_class(mut self, class: CharacterClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Classes of the given role, in listed order.
    pub fn classes_with_role(&self, role: ClassRole) -> impl Iterator<Item = &CharacterClass> {
        self.classes.iter().filter(move |c| c.role == role)
    }

    /// Check every replacement and, for unordered rule sets, that no character
    /// belongs to two substitution classes.
    pub fn validate(&self) -> Result<()> {
        for class in &self.classes {
            class.replacement_char()?;
        }

        if self.order == ApplyOrder::Unordered {
            let mut seen: HashSet<char> = HashSet::new();
            for class in self.classes_with_role(ClassRole::Substitution) {
                for ch in class.members.chars() {
                    if !seen.insert(ch) {
                        return Err(OrthoError::invalid_rule(format!(
                            "rule set '{}' is unordered but '{}' appears in more than one class (second: '{}')",
                            self.language, ch, class.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Load a rule set from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let rules: RuleSet = serde_json::from_str(&content)?;
        rules.validate()?;
        Ok(rules)
    }
}
