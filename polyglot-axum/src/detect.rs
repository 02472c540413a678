use std::collections::{BTreeSet, HashMap};

use axum::extract::{FromRequestParts, Query, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::Response;
use tokio::task_local;
use tracing::debug;

use crate::SharedPolyglot;

task_local! {
    pub static CURRENT_LANG: String;
}

/// Language selected for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lang(pub String);

impl<S> FromRequestParts<S> for Lang
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Lang>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Language of the request being handled, if the detection layer ran.
pub fn current_language() -> Option<String> {
    CURRENT_LANG.try_with(|lang| lang.clone()).ok()
}

/// Pick one of the engine's available languages for the request.
pub async fn detect_language(State(engine): State<SharedPolyglot>, mut req: Request, next: Next) -> Response {
    let lang = {
        let polyglot = engine.read().await;
        let supported = polyglot.available_languages();
        select_language(&supported, polyglot.preferred_language(), req.uri(), req.headers())
    };

    let Some(lang) = lang else {
        return next.run(req).await;
    };

    debug!(lang = %lang, path = %req.uri().path(), "Detected request language");
    req.extensions_mut().insert(Lang(lang.clone()));
    CURRENT_LANG.scope(lang, next.run(req)).await
}

/// Path segment, then `lang` query parameter, then `Accept-Language`, then the preferred language.
pub fn select_language(
    supported: &BTreeSet<String>,
    preferred: Option<&str>,
    uri: &Uri,
    headers: &HeaderMap,
) -> Option<String> {
    from_path(supported, uri)
        .or_else(|| from_query(supported, uri))
        .or_else(|| from_header(supported, headers))
        .or_else(|| preferred.map(str::to_string))
}

fn from_path(supported: &BTreeSet<String>, uri: &Uri) -> Option<String> {
    uri.path()
        .split('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| supported.contains(*segment))
        .map(str::to_string)
}

fn from_query(supported: &BTreeSet<String>, uri: &Uri) -> Option<String> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.remove("lang").filter(|value| supported.contains(value))
}

fn from_header(supported: &BTreeSet<String>, headers: &HeaderMap) -> Option<String> {
    let header = headers.get("accept-language").and_then(|v| v.to_str().ok())?;

    // "de-CH,de;q=0.9,en;q=0.8" -> [(1.0, "de-ch"), (0.9, "de"), (0.8, "en")]
    let mut langs: Vec<(f32, String)> = header
        .split(',')
        .filter_map(|part| {
            let mut sections = part.split(';');
            let lang = sections.next()?.trim().to_lowercase();
            if lang.is_empty() {
                return None;
            }
            let q_value = sections
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((q_value, lang))
        })
        // q=0 marks a language as not acceptable
        .filter(|(q_value, _)| *q_value > 0.0)
        .collect();

    langs.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    langs.into_iter().find_map(|(_, tag)| {
        let primary = tag.split('-').next().unwrap_or(&tag);
        supported.get(primary).cloned()
    })
}
