pub mod config;
pub mod paths;
pub mod session_store;

pub use config::{ApiConfig, Config, DiscoverConfig, LoggingConfig, API_URL_ENV};
pub use paths::{base_path_override, PathManager};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
