//! Numbered placeholder substitution.
//!
//! `$1`, `$2`, ... address the substitution slots by position. Every
//! occurrence of the same token receives the same value, and a slot holding
//! `None` leaves its token untouched so the text can be patched again later:
//!
//! ```
//! use polyglot_core::patch;
//!
//! let staged = patch("Hello, $1. You have $2 messages, $1.", &[Some("Eric"), None]).unwrap();
//! assert_eq!(staged, "Hello, Eric. You have $2 messages, Eric.");
//! assert_eq!(
//!     patch(&staged, &[None, Some("2")]).unwrap(),
//!     "Hello, Eric. You have 2 messages, Eric."
//! );
//! ```

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::ValidationError;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\$(\d+)").expect("Invalid regex pattern"))
}

/// Distinct placeholder numbers in ascending order.
///
/// Digit runs too long for `usize` are not placeholders.
pub fn placeholders(text: &str) -> Vec<usize> {
    placeholder_regex()
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Substitute `$N` tokens with `substitutions[N - 1]`.
///
/// Fails when a token is `$0`, or when a token addresses a slot past the end
/// of `substitutions`. Slots may be `None` to skip a placeholder.
pub fn patch(text: &str, substitutions: &[Option<&str>]) -> Result<String, ValidationError> {
    let found = placeholders(text);

    if let Some(&smallest) = found.first() {
        if smallest == 0 {
            return Err(ValidationError::PlaceholderStart(smallest));
        }
    }
    if let Some(&largest) = found.last() {
        if found.len() > substitutions.len() || largest > substitutions.len() {
            return Err(ValidationError::PlaceholderMismatch {
                placeholders: found,
                substitutions: substitutions.len(),
            });
        }
    }

    let patched = placeholder_regex().replace_all(text, |caps: &Captures| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|id| substitutions.get(id.wrapping_sub(1)).copied().flatten())
            .unwrap_or(&caps[0])
            .to_string()
    });

    Ok(patched.into_owned())
}
