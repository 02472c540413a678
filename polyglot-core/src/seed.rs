//! Seed dictionaries: identifier -> language -> text.
//!
//! Two layouts are understood. A seed file holds the full two-level mapping
//! (YAML or JSON via serde_yaml, or TOML). A locale directory holds one flat
//! identifier -> text file per language, named after the language code
//! (`en.toml`, `de.yaml`, ...), which is pivoted into the same shape.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::dictionary::Dictionary;
use crate::error::SeedError;

pub type Seed = Dictionary;

const LOCALE_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Parse a YAML or JSON seed.
pub fn load_from_str(content: &str) -> Result<Seed, SeedError> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn load_from_toml_str(content: &str) -> Result<Seed, SeedError> {
    Ok(toml::from_str(content)?)
}

/// Load a seed file, choosing the parser by extension.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Seed, SeedError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    if is_toml(path) {
        load_from_toml_str(&content)
    } else {
        load_from_str(&content)
    }
}

/// Load every `<lang>.<ext>` file of a directory and pivot into a seed.
///
/// Files with other extensions are skipped. The language code itself is
/// validated later, when the seed is added to a dictionary.
pub fn load_locale_dir<P: AsRef<Path>>(dir: P) -> Result<Seed, SeedError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SeedError::MissingDirectory(dir.display().to_string()));
    }

    let mut seed = Seed::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some((language, translations)) = load_locale_file(&path)? else {
            continue;
        };
        info!(language = %language, count = translations.len(), "Loaded locale file");
        for (identifier, text) in translations {
            seed.entry(identifier).or_default().insert(language.clone(), text);
        }
    }
    Ok(seed)
}

fn load_locale_file(path: &Path) -> Result<Option<(String, BTreeMap<String, String>)>, SeedError> {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return Ok(None);
    };
    if !path.is_file() || !LOCALE_EXTENSIONS.contains(&extension) {
        return Ok(None);
    }
    let Some(language) = path.file_stem().and_then(|stem| stem.to_str()) else {
        warn!("Skipping locale file with a non UTF-8 name: {}", path.display());
        return Ok(None);
    };

    let content = fs::read_to_string(path)?;
    let translations = if is_toml(path) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(Some((language.to_string(), translations)))
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("toml")
}

/// Embed a seed file at compile time.
#[macro_export]
macro_rules! include_seed {
    ($path:expr) => {
        $crate::seed::load_from_str(include_str!($path))
    };
}

pub use include_seed;

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "polyglot_seed_{}_{}_{}",
            name,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_yaml_and_json() {
        let yaml = r#"
        second translation:
          en: this is a test
          de: das ist ein test
        3rd translation:
          en: three
        "#;
        let seed = load_from_str(yaml).unwrap();
        assert_eq!(seed["second translation"]["de"], "das ist ein test");
        assert_eq!(seed["3rd translation"].len(), 1);

        let json = r#"{"Greeting": {"en": "Hello $1", "ru": "Привет $1"}}"#;
        let seed = load_from_str(json).unwrap();
        assert_eq!(seed["Greeting"]["ru"], "Привет $1");
    }

    #[test]
    fn test_load_toml() {
        let seed = load_from_toml_str("[Greeting]\nen = \"Hello\"\nde = \"Hallo\"\n").unwrap();
        assert_eq!(seed["Greeting"]["de"], "Hallo");
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(matches!(
            load_from_str("Greeting: Hello"),
            Err(SeedError::YamlParse(_))
        ));
    }

    #[test]
    fn test_load_locale_dir_pivots_languages() {
        let dir = temp_dir("locales");
        fs::write(dir.join("en.toml"), "Greeting = \"Hello\"\nFarewell = \"Bye\"\n").unwrap();
        fs::write(dir.join("de.yaml"), "Greeting: Hallo\n").unwrap();
        fs::write(dir.join("ru.json"), r#"{"Greeting": "Привет"}"#).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let seed = load_locale_dir(&dir).unwrap();
        assert_eq!(seed["Greeting"].len(), 3);
        assert_eq!(seed["Greeting"]["ru"], "Привет");
        assert_eq!(seed["Farewell"].keys().collect::<Vec<_>>(), vec!["en"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_locale_dir_reports_bad_files() {
        let dir = temp_dir("bad");
        fs::write(dir.join("en.toml"), "Greeting = ").unwrap();
        assert!(matches!(load_locale_dir(&dir), Err(SeedError::TomlParse(_))));
        let _ = fs::remove_dir_all(&dir);

        assert!(matches!(
            load_locale_dir("/this/path/should/not/exist"),
            Err(SeedError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_load_from_file_dispatches_on_extension() {
        let dir = temp_dir("files");
        let toml_path = dir.join("seed.toml");
        let json_path = dir.join("seed.json");
        fs::write(&toml_path, "[Greeting]\nen = \"Hello\"\n").unwrap();
        fs::write(&json_path, r#"{"Greeting": {"de": "Hallo"}}"#).unwrap();

        assert_eq!(load_from_file(&toml_path).unwrap()["Greeting"]["en"], "Hello");
        assert_eq!(load_from_file(&json_path).unwrap()["Greeting"]["de"], "Hallo");
        assert!(matches!(load_from_file(dir.join("missing.yaml")), Err(SeedError::Io(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
