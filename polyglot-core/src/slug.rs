//! URL-safe forms of translated text.

use std::sync::OnceLock;

use regex::Regex;

/// Lowercase, strip punctuation, trim, and join inner whitespace with `-`.
///
/// Punctuation covers ASCII symbols plus the General and Supplemental
/// Punctuation blocks, so `"Bon jour!"` becomes `"bon-jour"` and
/// `"Привет!"` becomes `"привет"`.
pub fn trim(text: &str) -> String {
    static PUNCTUATION_REGEX: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    let punctuation = PUNCTUATION_REGEX.get_or_init(|| {
        Regex::new(r##"[\u{2000}-\u{206F}\u{2E00}-\u{2E7F}\\'!"#$%&()*+,\-./:;<=>?@\[\]^_`{|}~]+"##)
            .expect("Invalid regex pattern")
    });
    let whitespace = WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    let lowered = text.to_lowercase();
    let stripped = punctuation.replace_all(&lowered, "");
    whitespace.replace_all(stripped.trim(), "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("hello"), "hello");
        assert_eq!(trim("Bon jour!"), "bon-jour");
        assert_eq!(trim("  Привет,  мир!  "), "привет-мир");
        assert_eq!(trim("It's “quoted” — really"), "its-quoted-really");
        assert_eq!(trim("snake_case/path"), "snakecasepath");
        assert_eq!(trim("!!!"), "");
    }
}
