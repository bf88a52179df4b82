use std::fs;

use orthocluster::error::{OrthoError, Result};
use orthocluster::phonetic::{PhoneticEncoder, RuleSet, SUPPORTED_LANGUAGES, encode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'è', 'g', 'h', 'i', 'k', 'l', 'm', 'n', 'o', 'ò', 'p', 'r', 's', 't',
    'u', 'w', 'y', 'z', '1', '7', '-',
];

fn random_word(rng: &mut StdRng) -> String {
    let len = rng.random_range(0..12);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn every_language_produces_codes_of_exact_length() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    for language in SUPPORTED_LANGUAGES {
        for code_length in [1, 4, 7] {
            for prefix_length in [0, 1, 3] {
                let encoder = PhoneticEncoder::for_language(language)?
                    .with_prefix_length(prefix_length)
                    .with_code_length(code_length);
                for _ in 0..200 {
                    let word = random_word(&mut rng);
                    let code = encoder.encode(&word);
                    assert_eq!(code.chars().count(), code_length, "{language} {word:?}");
                    assert_eq!(code, encoder.encode(&word));
                }
            }
        }
    }
    Ok(())
}

#[test]
fn american_soundex_reference_codes() -> Result<()> {
    for (word, code) in [
        ("Robert", "r163"),
        ("Rupert", "r163"),
        ("Ashcraft", "a261"),
        ("Tymczak", "t522"),
        ("Honeyman", "h555"),
    ] {
        assert_eq!(encode(word, "eng", 1, 4)?, code, "{word}");
        assert_eq!(encode(word, "eng-us", 1, 4)?, code, "{word}");
    }
    Ok(())
}

#[test]
fn encoding_ignores_case() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for language in SUPPORTED_LANGUAGES {
        let encoder = PhoneticEncoder::for_language(language)?;
        for _ in 0..100 {
            let word: String = random_word(&mut rng)
                .chars()
                .filter(char::is_ascii_alphabetic)
                .collect();
            assert_eq!(
                encoder.encode(&word),
                encoder.encode(&word.to_uppercase()),
                "{language} {word:?}"
            );
        }
    }
    Ok(())
}

#[test]
fn unsupported_language_is_rejected() {
    assert!(matches!(
        encode("mwen", "fra", 1, 4),
        Err(OrthoError::UnsupportedLanguage(_))
    ));
}

#[test]
fn custom_rule_set_from_json_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("silent.json");
    fs::write(
        &path,
        r#"{
            "language": "eng-silent",
            "classes": [
                {"name": "Silent", "replacement": "", "members": "gh"},
                {"name": "Alveolar", "replacement": "3", "members": "dt"},
                {"name": "Vocalic", "replacement": "", "members": "aeiouy", "role": "vocalic"}
            ]
        }"#,
    )?;

    let encoder = PhoneticEncoder::new(&RuleSet::load_from_file(&path)?)?;
    assert_eq!(encoder.language(), "eng-silent");
    assert_eq!(encoder.encode("night"), "n300");
    assert_eq!(encoder.encode("night"), encoder.encode("nite"));
    assert_eq!(encoder.distance("night", "nite"), 0);
    Ok(())
}

#[test]
fn malformed_rule_file_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"language": "bad", "classes": [{"name": "Labial", "replacement": "12", "members": "bp"}]}"#,
    )?;

    assert!(matches!(
        RuleSet::load_from_file(&path),
        Err(OrthoError::InvalidEncodingRule(_))
    ));
    Ok(())
}
