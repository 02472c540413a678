use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// identifier -> languages missing from that identifier's entry
pub type IncompleteTranslations = BTreeMap<String, Vec<String>>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Conflicting translation with identifier '{identifier}' and language '{language}'!")]
    Conflict { identifier: String, language: String },
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    pub fn is_consistency(&self) -> bool {
        matches!(self, Error::Consistency(_))
    }
}

/// Caller-fault input errors. Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid translation identifier '{0}'!")]
    InvalidIdentifier(String),
    #[error("Invalid language code '{0}'!")]
    InvalidLanguage(String),
    #[error("Malformed translation value for identifier '{identifier}' and language '{language}'!")]
    EmptyTranslation { identifier: String, language: String },
    #[error(
        "Mismatch between placeholders ({}) and {substitutions} substitution(s)! Every placeholder must address a supplied substitution.",
        Tokens(.placeholders)
    )]
    PlaceholderMismatch {
        placeholders: Vec<usize>,
        substitutions: usize,
    },
    #[error("Placeholder IDs must start with '$1', found '${0}'!")]
    PlaceholderStart(usize),
    #[error("Slug identifier '{0}' is not allowed to include special characters!")]
    SlugIdentifier(String),
    #[error("Dictionary is missing translations for identifier '{0}'!")]
    UnknownIdentifier(String),
}

/// Language-completeness and fallback invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("Missing translations for '{language}' on existing entries {}!", Report(.missing))]
    PreferredNotFullySupported {
        language: String,
        missing: IncompleteTranslations,
    },
    #[error(
        "Explicit override of '{identifier}' ({language}: {previous:?}) reports other missing translations for '{language}' on existing entries {}!",
        Report(.missing)
    )]
    PartialOverride {
        identifier: String,
        language: String,
        previous: String,
        missing: IncompleteTranslations,
    },
    #[error(
        "Fallback entry cannot render missing translation '{identifier}' for '{language}' (preferred language: {})!",
        .preferred.as_deref().unwrap_or("unset")
    )]
    FallbackUnavailable {
        identifier: String,
        language: String,
        preferred: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Seed directory not found: {0}")]
    MissingDirectory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

struct Tokens<'a>(&'a [usize]);

impl fmt::Display for Tokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "${id}")?;
            first = false;
        }
        Ok(())
    }
}

struct Report<'a>(&'a IncompleteTranslations);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (identifier, languages)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{identifier:?}: [{}]", languages.join(", "))?;
        }
        write!(f, "}}")
    }
}
