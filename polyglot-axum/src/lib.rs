use std::sync::Arc;

use polyglot_core::Polyglot;
use tokio::sync::RwLock;

pub mod detect;
pub mod logger;
pub mod resp;
pub mod route;
pub mod server;
pub mod translate;

pub use detect::{CURRENT_LANG, Lang, current_language, detect_language};
pub use logger::LoggerConfig;
pub use resp::ApiError;
pub use route::localized_router;
pub use server::{ServerConfig, WebServer};
pub use translate::t;

/// Engine shared across request handlers. Writers are exclusive, readers concurrent.
pub type SharedPolyglot = Arc<RwLock<Polyglot>>;
