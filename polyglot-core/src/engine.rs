use std::collections::BTreeSet;

use tracing::info;

use crate::completeness::Coverage;
use crate::config::EngineConfig;
use crate::dictionary::{Dictionary, DictionaryStore, Entry, OverridePolicy};
use crate::error::{ConsistencyError, IncompleteTranslations, Result, ValidationError};
use crate::preferred::PreferredLanguage;
use crate::resolver::{self, MISSING_TRANSLATION};
use crate::{seed, slug};

/// Reserved fallback texts every engine starts with.
pub const BUILTIN_MISSING_TRANSLATION: [(&str, &str); 3] = [
    ("en", "Translation '$1' for '$2' missing!"),
    ("de", "Übersetzung '$1' für '$2' fehlt!"),
    ("ru", "Перевод '$1' для '$2' отсутствует!"),
];

/// Language the built-in engine prefers.
pub const BUILTIN_PREFERRED_LANGUAGE: &str = "en";

/// A multilingual dictionary engine.
///
/// # Example
///
/// ```
/// use polyglot_core::Polyglot;
///
/// let mut polyglot = Polyglot::new();
/// polyglot.add("Greeting", "Hello $1", "en", false).unwrap();
///
/// assert_eq!(polyglot.translate("Greeting", Some("en"), &[Some("World")]).unwrap(), "Hello World");
/// assert_eq!(
///     polyglot.translate("Greeting", Some("fr"), &[]).unwrap(),
///     "Translation 'Greeting' for 'fr' missing!"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Polyglot {
    store: DictionaryStore,
    preferred: PreferredLanguage,
}

impl Default for Polyglot {
    fn default() -> Self {
        Self::new()
    }
}

/// Same as [`Polyglot::new`].
pub fn new_engine() -> Polyglot {
    Polyglot::new()
}

impl Polyglot {
    /// Engine seeded with the reserved fallback entry, preferring `en`.
    pub fn new() -> Self {
        Self::with_policy(OverridePolicy::default())
    }

    pub fn with_policy(policy: OverridePolicy) -> Self {
        let reserved: Entry = BUILTIN_MISSING_TRANSLATION
            .iter()
            .map(|(language, text)| (language.to_string(), text.to_string()))
            .collect();
        let mut entries = Dictionary::new();
        entries.insert(MISSING_TRANSLATION.to_string(), reserved);

        Self {
            store: DictionaryStore::preset(entries, policy),
            preferred: PreferredLanguage::preset(BUILTIN_PREFERRED_LANGUAGE),
        }
    }

    /// Engine without the reserved entry or a preferred language.
    ///
    /// Lookup misses are fatal until a seed provides the reserved entry.
    pub fn empty() -> Self {
        Self {
            store: DictionaryStore::new(),
            preferred: PreferredLanguage::default(),
        }
    }

    /// Build an engine from configuration: built-ins, seeds, then the preferred language.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut polyglot = Self::with_policy(config.override_policy);
        for path in &config.seeds {
            let seed = seed::load_from_file(path)?;
            info!(path = %path.display(), identifiers = seed.len(), "Loaded seed file");
            polyglot.add_all(&seed, false)?;
        }
        for dir in &config.locale_dirs {
            let seed = seed::load_locale_dir(dir)?;
            info!(dir = %dir.display(), identifiers = seed.len(), "Loaded locale directory");
            polyglot.add_all(&seed, false)?;
        }
        polyglot.set_preferred_language(&config.preferred_language)?;
        Ok(polyglot)
    }

    pub fn policy(&self) -> OverridePolicy {
        self.store.policy()
    }

    pub fn set_policy(&mut self, policy: OverridePolicy) {
        self.store.set_policy(policy);
    }

    /// Live, read-only view of every entry.
    pub fn dictionary(&self) -> &Dictionary {
        self.store.snapshot()
    }

    pub fn entry(&self, identifier: &str) -> Option<&Entry> {
        self.store.entry(identifier)
    }

    pub fn has(&self, identifier: &str, language: &str) -> Result<bool> {
        self.store.has(identifier, language)
    }

    pub fn add(&mut self, identifier: &str, text: &str, language: &str, force: bool) -> Result<String> {
        self.store.add(identifier, text, language, force)
    }

    /// Additive bulk insert. Never removes existing entries.
    pub fn add_all<I, L, K, V>(&mut self, seed: I, force: bool) -> Result<()>
    where
        I: IntoIterator<Item = (K, L)>,
        L: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.store.add_all(seed, force)
    }

    pub fn coverage(&self) -> Coverage<'_> {
        self.store.coverage()
    }

    pub fn available_languages(&self) -> BTreeSet<String> {
        self.coverage().available_languages()
    }

    pub fn fully_supported_languages(&self) -> BTreeSet<String> {
        self.coverage().fully_supported_languages()
    }

    pub fn partly_supported_languages(&self) -> BTreeSet<String> {
        self.coverage().partly_supported_languages()
    }

    pub fn incomplete_translations<S: AsRef<str>>(&self, languages: &[S]) -> Result<IncompleteTranslations> {
        Ok(self.coverage().incomplete_translations(languages)?)
    }

    pub fn incomplete_translations_report(&self) -> IncompleteTranslations {
        self.coverage().incomplete_translations_report()
    }

    pub fn preferred_language(&self) -> Option<&str> {
        self.preferred.get(&self.store.coverage())
    }

    pub fn set_preferred_language(&mut self, language: &str) -> Result<()> {
        let coverage = self.store.coverage();
        self.preferred.set(language, &coverage)
    }

    /// Render `identifier` in `language`, or in the preferred language when omitted.
    pub fn translate(&self, identifier: &str, language: Option<&str>, substitutions: &[Option<&str>]) -> Result<String> {
        let preferred = self.preferred_language();
        let Some(language) = language.or(preferred) else {
            return Err(ConsistencyError::FallbackUnavailable {
                identifier: identifier.to_string(),
                language: String::new(),
                preferred: None,
            }
            .into());
        };
        resolver::resolve(&self.store, preferred, identifier, language, substitutions)
    }

    /// Slug of every language variant of an entry, deduplicated.
    pub fn slugs(&self, identifier: &str) -> Result<Vec<String>> {
        if identifier != slug::trim(identifier) {
            return Err(ValidationError::SlugIdentifier(identifier.to_string()).into());
        }
        let entry = self
            .entry(identifier)
            .ok_or_else(|| ValidationError::UnknownIdentifier(identifier.to_string()))?;
        let mut slugs: Vec<String> = Vec::new();
        for text in entry.values() {
            let trimmed = slug::trim(text);
            if !trimmed.is_empty() && !slugs.contains(&trimmed) {
                slugs.push(trimmed);
            }
        }
        Ok(slugs)
    }

    /// Route segment matching any language variant, e.g. `:i18n_hello(hello|hallo|привет)`.
    pub fn slug_pattern(&self, identifier: &str, with_param_name: bool) -> Result<String> {
        let alternation = self.slugs(identifier)?.join("|");
        if alternation.is_empty() || !with_param_name {
            return Ok(alternation);
        }
        Ok(format!(":i18n_{identifier}({alternation})"))
    }
}
