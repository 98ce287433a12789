use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use wishlist_gateway::{normalize_details, normalize_search_results, MovieGateway, RemoteError};
use wishlist_models::{ExternalCandidate, Movie, MovieStatus};

/// Which collection a list view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMode {
    /// Every movie regardless of status
    All,
    Wishlist,
    Watched,
    /// Search results from the metadata provider
    Discover { query: String },
}

impl ListMode {
    fn label(&self) -> &'static str {
        match self {
            ListMode::All => "movies",
            ListMode::Wishlist => "wishlist",
            ListMode::Watched => "watched movies",
            ListMode::Discover { .. } => "search results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

struct ListState {
    mode: ListMode,
    load_state: LoadState,
    movies: Vec<Movie>,
    candidates: Vec<ExternalCandidate>,
    error: Option<String>,
}

/// Ordered collection of movies for one screen.
///
/// Every mutation is confirm-then-apply: the gateway call goes out first
/// and the local sequence is patched only after it succeeds. A patch for
/// an id that is no longer held is a no-op. Methods take `&self`, so
/// several calls can be in flight at once; the state lock is never held
/// across a gateway call and the last completion wins.
pub struct ListViewModel<G: MovieGateway> {
    gateway: Arc<G>,
    state: Mutex<ListState>,
}

impl<G: MovieGateway> ListViewModel<G> {
    pub fn new(gateway: Arc<G>, mode: ListMode) -> Self {
        Self {
            gateway,
            state: Mutex::new(ListState {
                mode,
                load_state: LoadState::Idle,
                movies: Vec::new(),
                candidates: Vec::new(),
                error: None,
            }),
        }
    }

    pub fn all(gateway: Arc<G>) -> Self {
        Self::new(gateway, ListMode::All)
    }

    pub fn wishlist(gateway: Arc<G>) -> Self {
        Self::new(gateway, ListMode::Wishlist)
    }

    pub fn watched(gateway: Arc<G>) -> Self {
        Self::new(gateway, ListMode::Watched)
    }

    pub fn discover(gateway: Arc<G>, query: impl Into<String>) -> Self {
        Self::new(gateway, ListMode::Discover { query: query.into() })
    }

    pub async fn mode(&self) -> ListMode {
        self.state.lock().await.mode.clone()
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.lock().await.load_state
    }

    pub async fn movies(&self) -> Vec<Movie> {
        self.state.lock().await.movies.clone()
    }

    pub async fn candidates(&self) -> Vec<ExternalCandidate> {
        self.state.lock().await.candidates.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// Fetch the collection for the current mode. Server order is kept
    /// as-is. On failure the previous collection stays in place.
    pub async fn load(&self) -> Result<(), RemoteError> {
        let mode = {
            let mut state = self.state.lock().await;
            state.load_state = LoadState::Loading;
            state.mode.clone()
        };
        debug!(mode = mode.label(), "Loading list");

        let result = match &mode {
            ListMode::All => self.gateway.fetch_all().await.map(Loaded::Movies),
            ListMode::Wishlist => self.gateway.fetch_wishlist().await.map(Loaded::Movies),
            ListMode::Watched => self.gateway.fetch_watched().await.map(Loaded::Movies),
            ListMode::Discover { query } => self
                .gateway
                .search(query)
                .await
                .map(|payload| Loaded::Candidates(normalize_search_results(&payload))),
        };

        let mut state = self.state.lock().await;
        match result {
            Ok(loaded) => {
                match loaded {
                    Loaded::Movies(movies) => {
                        info!(mode = mode.label(), count = movies.len(), "List loaded");
                        state.movies = movies;
                    }
                    Loaded::Candidates(candidates) => {
                        info!(mode = mode.label(), count = candidates.len(), "Search results loaded");
                        state.candidates = candidates;
                    }
                }
                state.error = None;
                state.load_state = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                error!(mode = mode.label(), "Error loading list: {}", e);
                state.error = Some(format!("Failed to load {}. Please try again later.", mode.label()));
                state.load_state = LoadState::Failed;
                Err(e)
            }
        }
    }

    /// Run a new search in discover mode. Blank queries are ignored.
    pub async fn search(&self, query: &str) -> Result<(), RemoteError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        {
            let mut state = self.state.lock().await;
            match &mut state.mode {
                ListMode::Discover { query: current } => *current = query.to_string(),
                _ => {
                    warn!("Search ignored outside discover mode");
                    return Ok(());
                }
            }
        }
        self.load().await
    }

    pub async fn clear_search(&self) {
        let mut state = self.state.lock().await;
        if let ListMode::Discover { query } = &mut state.mode {
            query.clear();
        }
        state.candidates.clear();
    }

    pub async fn delete(&self, id: u64) -> Result<(), RemoteError> {
        let result = self.gateway.delete(id).await;
        self.confirm(result, "delete movie").await?;

        let mut state = self.state.lock().await;
        let before = state.movies.len();
        state.movies.retain(|m| m.id != id);
        if state.movies.len() == before {
            warn!(movie_id = id, "Deleted movie was not in the list");
        } else {
            info!(movie_id = id, "Movie removed from list");
        }
        Ok(())
    }

    /// Mark as watched, sending the entry's current rating and review.
    pub async fn mark_watched(&self, id: u64) -> Result<(), RemoteError> {
        let (rating, review) = match self.find(id).await {
            Some(movie) => (movie.rating, movie.review),
            None => (None, None),
        };
        self.mark_watched_with(id, rating, review.as_deref()).await
    }

    pub async fn mark_watched_with(
        &self,
        id: u64,
        rating: Option<u8>,
        review: Option<&str>,
    ) -> Result<(), RemoteError> {
        let result = self.gateway.mark_watched(id, rating, review).await;
        self.confirm(result, "mark movie as watched").await?;
        self.apply_status(id, MovieStatus::Watched).await;
        Ok(())
    }

    /// Send the movie back to the wishlist through an update of its
    /// editable fields. Nothing is sent when the id isn't held locally.
    pub async fn move_to_wishlist(&self, id: u64) -> Result<(), RemoteError> {
        let Some(movie) = self.find(id).await else {
            warn!(movie_id = id, "Move to wishlist ignored: movie not in list");
            return Ok(());
        };
        let result = self.gateway.update(id, &movie.to_draft()).await;
        self.confirm(result, "move movie to wishlist").await?;
        self.apply_status(id, MovieStatus::Wishlist).await;
        Ok(())
    }

    /// Like or unlike depending on the entry's current state.
    ///
    /// The toggled values are computed from the entry as it was when the
    /// call went out.
    pub async fn toggle_like(&self, id: u64) -> Result<(), RemoteError> {
        let Some(movie) = self.find(id).await else {
            warn!(movie_id = id, "Like toggle ignored: movie not in list");
            return Ok(());
        };
        let toggled = movie.with_like_toggled();
        let result = if movie.user_liked {
            self.gateway.unlike(id).await
        } else {
            self.gateway.like(id).await
        };
        self.confirm(result, if movie.user_liked { "unlike movie" } else { "like movie" })
            .await?;

        let mut state = self.state.lock().await;
        match state.movies.iter_mut().find(|m| m.id == id) {
            Some(entry) => {
                entry.user_liked = toggled.user_liked;
                entry.likes_count = toggled.likes_count;
            }
            None => warn!(movie_id = id, "Like confirmed for a movie no longer in the list"),
        }
        Ok(())
    }

    /// Save a search result as a new wishlist movie. The created movie is
    /// appended locally only when this view is the wishlist.
    pub async fn add_external_candidate(&self, candidate: &ExternalCandidate) -> Result<Movie, RemoteError> {
        let draft = candidate.to_draft();
        let result = self.gateway.create(&draft).await;
        let created = self.confirm(result, "add movie").await?;
        info!(movie_id = created.id, external_id = %candidate.external_id, "Movie added to wishlist");

        let mut state = self.state.lock().await;
        if state.mode == ListMode::Wishlist {
            state.movies.push(created.clone());
        }
        Ok(created)
    }

    /// Add by external id, using a held search result when there is one
    /// and the provider's details otherwise.
    pub async fn add_external_by_id(&self, external_id: &str) -> Result<Movie, RemoteError> {
        let held = {
            let state = self.state.lock().await;
            state
                .candidates
                .iter()
                .find(|c| c.external_id == external_id)
                .cloned()
        };
        let candidate = match held {
            Some(candidate) => candidate,
            None => {
                let result = self.gateway.external_details(external_id).await;
                let payload = self.confirm(result, "fetch movie details").await?;
                match normalize_details(&payload) {
                    Some(candidate) => candidate,
                    None => {
                        let message = format!("No movie found for {}", external_id);
                        self.state.lock().await.error = Some(message.clone());
                        return Err(RemoteError {
                            message,
                            status_code: None,
                        });
                    }
                }
            }
        };
        self.add_external_candidate(&candidate).await
    }

    async fn find(&self, id: u64) -> Option<Movie> {
        self.state
            .lock()
            .await
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    /// Drop the entry if the new status no longer belongs in this view,
    /// otherwise replace it in place.
    async fn apply_status(&self, id: u64, status: MovieStatus) {
        let mut state = self.state.lock().await;
        let leaves_view = matches!(
            (&state.mode, status),
            (ListMode::Wishlist, MovieStatus::Watched) | (ListMode::Watched, MovieStatus::Wishlist)
        );
        let Some(index) = state.movies.iter().position(|m| m.id == id) else {
            warn!(movie_id = id, %status, "Status change confirmed for a movie not in the list");
            return;
        };
        if leaves_view {
            state.movies.remove(index);
        } else {
            let updated = state.movies[index].with_status(status);
            state.movies[index] = updated;
        }
        info!(movie_id = id, %status, "Movie status updated");
    }

    async fn confirm<T>(&self, result: Result<T, RemoteError>, action: &str) -> Result<T, RemoteError> {
        match result {
            Ok(value) => {
                self.state.lock().await.error = None;
                Ok(value)
            }
            Err(e) => {
                error!("Error trying to {}: {}", action, e);
                self.state.lock().await.error = Some(format!("Failed to {}. Please try again.", action));
                Err(e)
            }
        }
    }
}

enum Loaded {
    Movies(Vec<Movie>),
    Candidates(Vec<ExternalCandidate>),
}
