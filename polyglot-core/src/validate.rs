//! Format rules for translation identifiers and language codes.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

/// Letters, digits, space and a short punctuation allow-list, at least three characters.
pub fn is_identifier(value: &str) -> bool {
    static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = IDENTIFIER_REGEX.get_or_init(|| {
        Regex::new(r#"^[\p{L}\p{N} _.,:;!?'"()\[\]\-]{3,}$"#).expect("Invalid regex pattern")
    });
    re.is_match(value)
}

/// Exactly two lowercase ASCII letters.
pub fn is_language(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_lowercase())
}

pub fn identifier(value: &str) -> Result<(), ValidationError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier(value.to_string()))
    }
}

pub fn language(value: &str) -> Result<(), ValidationError> {
    if is_language(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLanguage(value.to_string()))
    }
}
