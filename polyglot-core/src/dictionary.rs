use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::completeness::Coverage;
use crate::error::{ConsistencyError, Error, Result, ValidationError};
use crate::validate;

/// language -> text
pub type Entry = BTreeMap<String, String>;

/// identifier -> entry
pub type Dictionary = BTreeMap<String, Entry>;

/// What an explicit override does when its language is only partly supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverridePolicy {
    /// Refuse the override with [`ConsistencyError::PartialOverride`].
    #[default]
    Strict,
    /// Log the incomplete report and store the text anyway.
    Relaxed,
}

/// Owns the identifier -> language -> text mapping.
///
/// Entries only ever grow: there is no removal, and replacing the whole
/// mapping is expressed as [`DictionaryStore::add_all`].
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    entries: Dictionary,
    policy: OverridePolicy,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: OverridePolicy) -> Self {
        Self {
            entries: Dictionary::new(),
            policy,
        }
    }

    /// Store over entries already known to satisfy the format rules.
    pub(crate) fn preset(entries: Dictionary, policy: OverridePolicy) -> Self {
        Self { entries, policy }
    }

    pub fn policy(&self) -> OverridePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: OverridePolicy) {
        self.policy = policy;
    }

    /// Read-only view of the whole dictionary.
    pub fn snapshot(&self) -> &Dictionary {
        &self.entries
    }

    pub fn coverage(&self) -> Coverage<'_> {
        Coverage::new(&self.entries)
    }

    pub fn entry(&self, identifier: &str) -> Option<&Entry> {
        self.entries.get(identifier)
    }

    /// Stored text for a pair, without format validation.
    pub fn text(&self, identifier: &str, language: &str) -> Option<&str> {
        self.entries
            .get(identifier)
            .and_then(|entry| entry.get(language))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Whether a non-empty translation exists for the pair.
    pub fn has(&self, identifier: &str, language: &str) -> Result<bool> {
        validate::language(language)?;
        validate::identifier(identifier)?;
        Ok(self.text(identifier, language).is_some())
    }

    /// Store one translation and return the stored text.
    ///
    /// An existing pair is only replaced when `force` is set.
    pub fn add(&mut self, identifier: &str, text: &str, language: &str, force: bool) -> Result<String> {
        let exists = self.has(identifier, language)?;
        if text.is_empty() {
            return Err(ValidationError::EmptyTranslation {
                identifier: identifier.to_string(),
                language: language.to_string(),
            }
            .into());
        }
        if exists && !force {
            return Err(Error::Conflict {
                identifier: identifier.to_string(),
                language: language.to_string(),
            });
        }
        if exists {
            self.check_override(identifier, language)?;
        }

        self.entries
            .entry(identifier.to_string())
            .or_default()
            .insert(language.to_string(), text.to_string());
        debug!(identifier, language, force, "Stored translation");
        Ok(text.to_string())
    }

    /// Bulk form of [`add`](Self::add) over identifier -> language -> text.
    ///
    /// Stops at the first failing triple. Triples visited before it stay stored.
    pub fn add_all<I, L, K, V>(&mut self, seed: I, force: bool) -> Result<()>
    where
        I: IntoIterator<Item = (K, L)>,
        L: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (identifier, translations) in seed {
            for (language, text) in translations {
                self.add(identifier.as_ref(), text.as_ref(), language.as_ref(), force)?;
            }
        }
        Ok(())
    }

    fn check_override(&self, identifier: &str, language: &str) -> Result<()> {
        let coverage = self.coverage();
        if coverage.is_fully_supported(language) {
            return Ok(());
        }

        let missing = coverage.incomplete_translations(&[language])?;
        match self.policy {
            OverridePolicy::Strict => Err(ConsistencyError::PartialOverride {
                identifier: identifier.to_string(),
                language: language.to_string(),
                previous: self.text(identifier, language).unwrap_or_default().to_string(),
                missing,
            }
            .into()),
            OverridePolicy::Relaxed => {
                warn!(
                    identifier,
                    language,
                    ?missing,
                    "Override of a partly supported language; other entries are missing it"
                );
                Ok(())
            }
        }
    }
}
