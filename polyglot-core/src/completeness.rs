//! Language coverage derived from a dictionary snapshot.
//!
//! Nothing here is cached. A [`Coverage`] borrows the dictionary, so the
//! borrow checker already rules out computing a report in the middle of a
//! mutation.

use std::collections::BTreeSet;

use crate::dictionary::Dictionary;
use crate::error::{IncompleteTranslations, ValidationError};
use crate::validate;

#[derive(Debug, Clone, Copy)]
pub struct Coverage<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> Coverage<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// Union of the language keys of every entry.
    pub fn available_languages(&self) -> BTreeSet<String> {
        self.dictionary
            .values()
            .flat_map(|entry| entry.keys().cloned())
            .collect()
    }

    /// Languages present in every entry. Empty when the dictionary is empty.
    pub fn fully_supported_languages(&self) -> BTreeSet<String> {
        let mut entries = self.dictionary.values();
        let Some(first) = entries.next() else {
            return BTreeSet::new();
        };

        let mut languages: BTreeSet<String> = first.keys().cloned().collect();
        for entry in entries {
            languages.retain(|language| entry.contains_key(language));
        }
        languages
    }

    /// Available languages that at least one entry lacks.
    pub fn partly_supported_languages(&self) -> BTreeSet<String> {
        let fully = self.fully_supported_languages();
        self.available_languages()
            .into_iter()
            .filter(|language| !fully.contains(language))
            .collect()
    }

    pub fn is_fully_supported(&self, language: &str) -> bool {
        !self.dictionary.is_empty()
            && self
                .dictionary
                .values()
                .all(|entry| entry.contains_key(language))
    }

    /// For each identifier, the given languages its entry lacks.
    ///
    /// Complete identifiers are left out of the report.
    pub fn incomplete_translations<S: AsRef<str>>(
        &self,
        languages: &[S],
    ) -> Result<IncompleteTranslations, ValidationError> {
        for language in languages {
            validate::language(language.as_ref())?;
        }
        Ok(self.report(languages.iter().map(AsRef::as_ref)))
    }

    /// Incomplete-translation report over every available language.
    pub fn incomplete_translations_report(&self) -> IncompleteTranslations {
        let available = self.available_languages();
        self.report(available.iter().map(String::as_str))
    }

    fn report<'l>(&self, languages: impl Iterator<Item = &'l str> + Clone) -> IncompleteTranslations {
        self.dictionary
            .iter()
            .filter_map(|(identifier, entry)| {
                let missing: Vec<String> = languages
                    .clone()
                    .filter(|language| !entry.contains_key(*language))
                    .map(str::to_string)
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some((identifier.clone(), missing))
                }
            })
            .collect()
    }
}
