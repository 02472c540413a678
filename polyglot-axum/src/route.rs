use std::fmt::Write;

use axum::Router;
use axum::routing::MethodRouter;
use polyglot_core::{Polyglot, Result};

/// Register `/{lang}/<slug>` for every language variant of `identifier`.
///
/// With `hello` translated as `hello`, `hallo` and `привет`, the handler
/// answers `/en/hello`, `/de/hallo` and `/ru/привет`, but also mixed
/// combinations such as `/de/привет`. Use the [`Lang`](crate::Lang)
/// extractor to see which language the request was detected as.
pub fn localized_router<S>(polyglot: &Polyglot, identifier: &str, route: MethodRouter<S>) -> Result<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    let mut router = Router::new();
    for slug in polyglot.slugs(identifier)? {
        router = router.route(&format!("/{{lang}}/{}", encode_segment(&slug)), route.clone());
    }
    Ok(router)
}

/// Percent-encode a path segment the way clients send it on the wire.
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}
