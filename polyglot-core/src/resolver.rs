//! Lookup with the missing-translation fallback chain.
//!
//! A lookup ends in one of four states, tried in order:
//!
//! | State | Condition | Output |
//! |-------|-----------|--------|
//! | direct hit | `(identifier, language)` exists | entry patched with the caller's substitutions |
//! | fallback, requested language | reserved entry has `language` | reserved text patched with `(identifier, language)` |
//! | fallback, preferred language | reserved entry has the preferred language | reserved text patched with `(identifier, language)` |
//! | fatal | none of the above | [`ConsistencyError::FallbackUnavailable`] |

use tracing::{error, warn};

use crate::dictionary::DictionaryStore;
use crate::error::{ConsistencyError, Result};
use crate::patch::patch;
use crate::validate;

/// Reserved identifier rendered when a translation is missing.
pub const MISSING_TRANSLATION: &str = "Missing Translation Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Direct,
    FallbackRequested,
    FallbackPreferred,
}

/// Resolve `identifier` in `language` and return the rendered text.
///
/// An identifier that does not pass the identifier format is treated as a
/// miss rather than an error, so the fallback message can still name it.
pub fn resolve(
    store: &DictionaryStore,
    preferred: Option<&str>,
    identifier: &str,
    language: &str,
    substitutions: &[Option<&str>],
) -> Result<String> {
    resolve_traced(store, preferred, identifier, language, substitutions).map(|(text, _)| text)
}

/// Like [`resolve`], also reporting which state produced the text.
pub fn resolve_traced(
    store: &DictionaryStore,
    preferred: Option<&str>,
    identifier: &str,
    language: &str,
    substitutions: &[Option<&str>],
) -> Result<(String, Resolution)> {
    validate::language(language)?;

    if validate::is_identifier(identifier) {
        if let Some(text) = store.text(identifier, language) {
            return Ok((patch(text, substitutions)?, Resolution::Direct));
        }
    }

    let arguments = [Some(identifier), Some(language)];
    if let Some(text) = store.text(MISSING_TRANSLATION, language) {
        warn!(identifier, language, "Missing translation");
        return Ok((patch(text, &arguments)?, Resolution::FallbackRequested));
    }

    if let Some(text) = preferred.and_then(|preferred| store.text(MISSING_TRANSLATION, preferred)) {
        warn!(identifier, language, preferred, "Missing translation, rendered in preferred language");
        return Ok((patch(text, &arguments)?, Resolution::FallbackPreferred));
    }

    error!(identifier, language, preferred, "Fallback entry does not cover the preferred language");
    Err(ConsistencyError::FallbackUnavailable {
        identifier: identifier.to_string(),
        language: language.to_string(),
        preferred: preferred.map(str::to_string),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn store() -> DictionaryStore {
        let mut store = DictionaryStore::new();
        store
            .add_all(
                [(
                    MISSING_TRANSLATION,
                    [
                        ("en", "Translation '$1' for '$2' missing!"),
                        ("de", "Übersetzung '$1' für '$2' fehlt!"),
                        ("ru", "Перевод '$1' для '$2' отсутствует!"),
                    ],
                )],
                false,
            )
            .unwrap();
        store.add("Greeting", "Hello $1", "en", false).unwrap();
        store.add("Foo", "foo$1", "de", false).unwrap();
        store
    }

    #[test]
    fn test_direct_hit_is_patched() {
        let store = store();
        assert_eq!(
            resolve_traced(&store, Some("en"), "Greeting", "en", &[Some("World")]).unwrap(),
            ("Hello World".to_string(), Resolution::Direct)
        );
        assert_eq!(resolve(&store, Some("en"), "Foo", "de", &[Some("bar")]).unwrap(), "foobar");
    }

    #[test]
    fn test_fallback_in_requested_language() {
        let store = store();
        let (text, state) = resolve_traced(&store, Some("en"), "Foobar", "de", &[]).unwrap();
        assert_eq!(state, Resolution::FallbackRequested);
        assert_eq!(text, "Übersetzung 'Foobar' für 'de' fehlt!");
    }

    #[test]
    fn test_fallback_in_preferred_language() {
        let store = store();
        let (text, state) = resolve_traced(&store, Some("en"), "Greeting", "fr", &[]).unwrap();
        assert_eq!(state, Resolution::FallbackPreferred);
        assert_eq!(text, "Translation 'Greeting' for 'fr' missing!");
    }

    #[test]
    fn test_fallback_ignores_caller_substitutions() {
        let store = store();
        assert_eq!(
            resolve(&store, Some("en"), "Greeting", "fr", &[Some("World")]).unwrap(),
            "Translation 'Greeting' for 'fr' missing!"
        );
    }

    #[test]
    fn test_malformed_identifier_is_a_miss() {
        let store = store();
        assert_eq!(
            resolve(&store, Some("en"), "ab", "en", &[]).unwrap(),
            "Translation 'ab' for 'en' missing!"
        );
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let store = store();
        assert!(resolve(&store, Some("en"), "Greeting", "EN", &[]).unwrap_err().is_validation());
    }

    #[test]
    fn test_direct_hit_placeholder_mismatch_is_reported() {
        let store = store();
        assert!(resolve(&store, Some("en"), "Greeting", "en", &[]).unwrap_err().is_validation());
    }

    #[test]
    fn test_fatal_without_preferred_coverage() {
        let store = store();
        let err = resolve(&store, Some("es"), "Foo", "es", &[]).unwrap_err();
        assert!(err.is_consistency());
        match err {
            Error::Consistency(ConsistencyError::FallbackUnavailable { identifier, language, preferred }) => {
                assert_eq!(identifier, "Foo");
                assert_eq!(language, "es");
                assert_eq!(preferred.as_deref(), Some("es"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(resolve(&store, None, "Foo", "es", &[]).unwrap_err().is_consistency());
    }
}
