//! In-memory multilingual dictionary.
//!
//! One translation is stored per (identifier, language) pair. The engine
//! derives which languages every entry supports, guards the preferred
//! language against incomplete coverage, compiles `$N` placeholders, and
//! renders a reserved fallback message when a translation is missing.

pub mod completeness;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod patch;
pub mod preferred;
pub mod resolver;
pub mod seed;
pub mod slug;
pub mod validate;

pub use completeness::Coverage;
pub use config::EngineConfig;
pub use dictionary::{Dictionary, DictionaryStore, Entry, OverridePolicy};
pub use engine::{Polyglot, new_engine};
pub use error::{ConfigError, ConsistencyError, Error, IncompleteTranslations, Result, SeedError, ValidationError};
pub use patch::patch;
pub use preferred::PreferredLanguage;
pub use resolver::{MISSING_TRANSLATION, Resolution};
pub use seed::Seed;
