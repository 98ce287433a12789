use color_eyre::eyre::{eyre, Report};
use color_eyre::Result;
use std::sync::Arc;
use wishlist_config::{Config, FileSessionStore, PathManager};
use wishlist_core::SessionHolder;
use wishlist_gateway::{HttpMovieGateway, RemoteError};

pub mod account;
pub mod config;
pub mod lists;
pub mod movie;
pub mod prompts;

/// Everything a command needs, built once in `main`.
pub struct AppContext {
    paths: PathManager,
    pub config: Config,
    gateway: Arc<HttpMovieGateway>,
}

impl AppContext {
    pub fn new(paths: PathManager, config: Config) -> Self {
        let gateway = Arc::new(HttpMovieGateway::new(config.api_base_url()));
        Self {
            paths,
            config,
            gateway,
        }
    }

    pub fn gateway(&self) -> Arc<HttpMovieGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn session(&self) -> Result<SessionHolder<FileSessionStore>> {
        let session_file = self.paths.session_file();
        let store = FileSessionStore::open(session_file.clone()).map_err(|e| {
            eyre!("Failed to open session store at {}: {}", session_file.display(), e)
        })?;
        Ok(SessionHolder::new(store))
    }
}

/// Turn a gateway failure into the report shown to the user, preferring the
/// view-model's message over the raw one.
pub fn remote_failure(message: Option<String>, err: RemoteError) -> Report {
    match message {
        Some(message) => eyre!("{} ({})", message, err),
        None => Report::new(err),
    }
}
