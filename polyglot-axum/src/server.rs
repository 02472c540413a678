use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next, from_fn_with_state};
use axum::response::Response;
use polyglot_core::{EngineConfig, Polyglot};
use serde::Deserialize;
use tokio::signal;
use tokio::sync::RwLock;

use crate::SharedPolyglot;
use crate::detect::detect_language;
use crate::logger::LoggerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub engine: EngineConfig,
    pub logging: LoggerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            engine: EngineConfig::default(),
            logging: LoggerConfig::default(),
        }
    }
}

pub struct WebServer {
    router: Router,
    addr: String,
    engine: SharedPolyglot,
    middlewares: Vec<Box<dyn FnOnce(Router) -> Router + Send>>,
}

impl WebServer {
    pub fn new(addr: impl Into<String>, engine: Polyglot) -> Self {
        Self {
            router: Router::new(),
            addr: addr.into(),
            engine: Arc::new(RwLock::new(engine)),
            middlewares: Vec::new(),
        }
    }

    /// Build the engine from configuration. Logging is left to the caller.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let engine = Polyglot::from_config(&config.engine)?;
        Ok(Self::new(config.addr.clone(), engine))
    }

    /// Handle to the engine shared with the middleware.
    pub fn engine(&self) -> SharedPolyglot {
        self.engine.clone()
    }

    pub fn layer_language(mut self) -> Self {
        let engine = self.engine.clone();
        self.middlewares
            .push(Box::new(move |r| r.layer(from_fn_with_state(engine, detect_language))));
        self
    }

    pub fn layer_fn<F, Fut>(mut self, f: F) -> Self
    where
        F: Clone + Send + Sync + 'static + Fn(Request, Next) -> Fut,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.middlewares.push(Box::new(|r| r.layer(middleware::from_fn(f))));
        self
    }

    pub fn mount(mut self, router: Router) -> Self {
        self.router = self.router.merge(router);
        self
    }

    /// Router with every middleware applied, in registration order.
    pub fn into_router(self) -> Router {
        let mut router = self.router;
        for m in self.middlewares {
            router = m(router);
        }
        router
    }

    pub async fn start(self) -> anyhow::Result<()> {
        tracing::info!("Starting web server at {}", self.addr);

        let addr = self.addr.clone();
        let router = self.into_router();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        let server = axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown());
        if let Err(e) = server.await {
            tracing::error!("Server error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::CURRENT_LANG;
    use axum::body::Body;
    use axum::routing::get;
    use http::Request;
    use tower::util::ServiceExt;

    async fn check_lang() -> String {
        CURRENT_LANG.try_with(|l| l.clone()).unwrap_or_else(|_| "not set".to_string())
    }

    async fn body_of(router: Router, uri: &str) -> String {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = ServiceExt::oneshot(router, req).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_layer_after_mount() {
        let router = WebServer::new("0.0.0.0:0", Polyglot::new())
            .mount(Router::new().route("/", get(check_lang)))
            .layer_language()
            .into_router();

        assert_eq!(body_of(router, "/").await, "en");
    }

    #[tokio::test]
    async fn test_layer_before_mount() {
        let router = WebServer::new("0.0.0.0:0", Polyglot::new())
            .layer_language()
            .mount(Router::new().route("/", get(check_lang)))
            .into_router();

        assert_eq!(body_of(router, "/?lang=ru").await, "ru");
    }

    #[tokio::test]
    async fn test_without_layer_language_is_unset() {
        let router = WebServer::new("0.0.0.0:0", Polyglot::new())
            .mount(Router::new().route("/", get(check_lang)))
            .into_router();

        assert_eq!(body_of(router, "/").await, "not set");
    }

    async fn tag_response(req: Request<Body>, next: Next) -> Response {
        let mut response = next.run(req).await;
        response
            .headers_mut()
            .insert("x-polyglot", http::HeaderValue::from_static("on"));
        response
    }

    #[tokio::test]
    async fn test_layer_fn_runs_custom_middleware() {
        let router = WebServer::new("0.0.0.0:0", Polyglot::new())
            .mount(Router::new().route("/", get(check_lang)))
            .layer_language()
            .layer_fn(tag_response)
            .into_router();

        let req = Request::builder().uri("/?lang=de").body(Body::empty()).unwrap();
        let response = ServiceExt::oneshot(router, req).await.unwrap();
        assert_eq!(response.headers()["x-polyglot"], "on");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"de");
    }

    #[test]
    fn test_server_config_from_yaml() {
        let yaml = r#"
        addr: 127.0.0.1:3000
        engine:
          preferred_language: de
        logging:
          level: debug
        "#;
        let config: ServerConfig = polyglot_core::config::load_from_str(yaml).unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000");
        assert_eq!(config.engine.preferred_language, "de");
        assert_eq!(config.logging, LoggerConfig::new().level("debug"));

        let server = WebServer::from_config(&config).unwrap();
        assert_eq!(server.addr, "127.0.0.1:3000");
    }
}
