//! Engine configuration loaded from YAML, with `${VAR}` / `${VAR:default}`
//! environment substitution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use dotenvy::dotenv;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::dictionary::OverridePolicy;
use crate::engine::BUILTIN_PREFERRED_LANGUAGE;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub preferred_language: String,
    pub override_policy: OverridePolicy,
    /// Two-level seed files, added in order.
    pub seeds: Vec<PathBuf>,
    /// Directories of per-language files, added after `seeds`.
    pub locale_dirs: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preferred_language: BUILTIN_PREFERRED_LANGUAGE.to_string(),
            override_policy: OverridePolicy::default(),
            seeds: Vec::new(),
            locale_dirs: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_from_file(path)
    }

    pub fn load_from_str(yaml_content: &str) -> Result<Self, ConfigError> {
        load_from_str(yaml_content)
    }
}

/// Replace environment placeholders in YAML text.
fn replace_vars(yaml_content: &str) -> String {
    // a missing .env file is normal outside development
    let _ = dotenv();

    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z0-9_]+)(?::([^\}]*))?\}").expect("Invalid regex pattern")
    });

    let result = re.replace_all(yaml_content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str());

        match env::var(var_name) {
            Ok(val) => val,
            Err(_) => default.unwrap_or("").to_string(),
        }
    });

    result.into_owned()
}

/// Load any YAML-backed configuration section from a file.
pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str<T: DeserializeOwned>(yaml_content: &str) -> Result<T, ConfigError> {
    let replaced = replace_vars(yaml_content);
    Ok(serde_yaml::from_str(&replaced)?)
}
