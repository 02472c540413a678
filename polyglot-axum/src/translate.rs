use polyglot_core::Result;

use crate::SharedPolyglot;
use crate::detect::current_language;

/// Translate into the language detected for the current request.
///
/// Outside of a request scope the engine's preferred language is used.
pub async fn t(engine: &SharedPolyglot, identifier: &str, substitutions: &[Option<&str>]) -> Result<String> {
    let lang = current_language();
    engine
        .read()
        .await
        .translate(identifier, lang.as_deref(), substitutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::CURRENT_LANG;
    use polyglot_core::Polyglot;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn engine() -> SharedPolyglot {
        let mut polyglot = Polyglot::new();
        polyglot
            .add_all([("Welcome", [("en", "Welcome, $1!"), ("de", "Willkommen, $1!"), ("ru", "Добро пожаловать, $1!")])], false)
            .unwrap();
        Arc::new(RwLock::new(polyglot))
    }

    #[tokio::test]
    async fn test_uses_request_language() {
        let engine = engine();
        let text = CURRENT_LANG
            .scope("de".to_string(), async { t(&engine, "Welcome", &[Some("Jason")]).await })
            .await
            .unwrap();
        assert_eq!(text, "Willkommen, Jason!");
    }

    #[tokio::test]
    async fn test_outside_request_uses_preferred() {
        let engine = engine();
        assert_eq!(t(&engine, "Welcome", &[Some("Jason")]).await.unwrap(), "Welcome, Jason!");
        assert_eq!(
            t(&engine, "Farewell", &[]).await.unwrap(),
            "Translation 'Farewell' for 'en' missing!"
        );
    }
}
