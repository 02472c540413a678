use tracing::info;

use crate::completeness::Coverage;
use crate::error::{ConsistencyError, Result};
use crate::validate;

/// The engine's default language.
///
/// Only a fully supported language can be selected. Reads re-check the
/// stored value against the current coverage and report `None` once it is
/// no longer available.
#[derive(Debug, Clone, Default)]
pub struct PreferredLanguage {
    language: Option<String>,
}

impl PreferredLanguage {
    pub(crate) fn preset(language: &str) -> Self {
        Self {
            language: Some(language.to_string()),
        }
    }

    pub fn get<'a>(&'a self, coverage: &Coverage<'_>) -> Option<&'a str> {
        self.language
            .as_deref()
            .filter(|language| coverage.available_languages().contains(*language))
    }

    pub fn set(&mut self, language: &str, coverage: &Coverage<'_>) -> Result<()> {
        validate::language(language)?;
        if !coverage.is_fully_supported(language) {
            let missing = coverage.incomplete_translations(&[language])?;
            return Err(ConsistencyError::PreferredNotFullySupported {
                language: language.to_string(),
                missing,
            }
            .into());
        }

        info!(language, "Preferred language set");
        self.language = Some(language.to_string());
        Ok(())
    }
}
