use anyhow::Result;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};
use wishlist_config::SessionStore;
use wishlist_models::{Session, User};

/// Storage key the current user is persisted under.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Produces the session a login turns into.
pub trait SessionProvider: Send + Sync {
    fn open_session(&self, username: &str, password: &str) -> Result<Session>;
}

/// Authentication is stubbed: every login becomes the fixed guest.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuestSessionProvider;

impl SessionProvider for GuestSessionProvider {
    fn open_session(&self, _username: &str, _password: &str) -> Result<Session> {
        Ok(Session::guest())
    }
}

/// Holder of the current session, backed by a durable store that is read
/// once on construction.
///
/// Changes are pushed to subscribers synchronously, in the order they
/// subscribed. Subscribers whose receiver has been dropped are pruned.
pub struct SessionHolder<S: SessionStore> {
    store: S,
    provider: Box<dyn SessionProvider>,
    current: Option<Session>,
    subscribers: Vec<UnboundedSender<Option<Session>>>,
}

impl<S: SessionStore> SessionHolder<S> {
    pub fn new(store: S) -> Self {
        Self::with_provider(store, Box::new(GuestSessionProvider))
    }

    pub fn with_provider(store: S, provider: Box<dyn SessionProvider>) -> Self {
        let current = match store.get(CURRENT_USER_KEY) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(Session::new(user)),
                Err(e) => {
                    warn!("Ignoring unreadable stored session: {}", e);
                    None
                }
            },
            None => None,
        };

        Self {
            store,
            provider,
            current,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.clone()
    }

    /// Always true while authentication is stubbed out.
    pub fn is_authenticated(&self) -> bool {
        true
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<Option<Session>> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let session = self.provider.open_session(username, password)?;
        let raw = serde_json::to_string(&session.user)?;
        self.store.set(CURRENT_USER_KEY, raw)?;
        self.current = Some(session.clone());
        info!(username = %session.user.username, "Session started");
        self.broadcast();
        Ok(session)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        self.current = None;
        info!("Session cleared");
        self.broadcast();
        Ok(())
    }

    fn broadcast(&mut self) {
        let current = self.current.clone();
        self.subscribers.retain(|tx| tx.send(current.clone()).is_ok());
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
