use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use wishlist_gateway::{MovieGateway, RemoteError};
use wishlist_models::{Comment, Movie, MovieStatus};
use crate::navigation::Navigation;

#[derive(Default)]
struct DetailState {
    movie: Option<Movie>,
    comments: Vec<Comment>,
    loading: bool,
    /// Blocks rendering of the movie
    error: Option<String>,
    /// Shown next to the comment thread only
    comment_error: Option<String>,
}

/// One movie and its comment thread.
pub struct DetailViewModel<G: MovieGateway> {
    gateway: Arc<G>,
    state: Mutex<DetailState>,
}

impl<G: MovieGateway> DetailViewModel<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(DetailState::default()),
        }
    }

    pub async fn movie(&self) -> Option<Movie> {
        self.state.lock().await.movie.clone()
    }

    pub async fn comments(&self) -> Vec<Comment> {
        self.state.lock().await.comments.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn comment_error(&self) -> Option<String> {
        self.state.lock().await.comment_error.clone()
    }

    /// Fetch the movie and its comments side by side.
    ///
    /// Only a failed movie fetch is returned as an error. A failed comment
    /// fetch leaves the thread empty and records a non-blocking message.
    pub async fn load(&self, id: u64) -> Result<(), RemoteError> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
            state.comment_error = None;
        }
        debug!(movie_id = id, "Loading movie detail");

        let (movie_result, comments_result) =
            futures::join!(self.gateway.fetch_one(id), self.gateway.fetch_comments(id));

        let mut state = self.state.lock().await;
        state.loading = false;

        match comments_result {
            Ok(comments) => state.comments = comments,
            Err(e) => {
                warn!(movie_id = id, "Error loading comments: {}", e);
                state.comments.clear();
                state.comment_error = Some("Failed to load comments.".to_string());
            }
        }

        match movie_result {
            Ok(movie) => {
                state.movie = Some(movie);
                Ok(())
            }
            Err(e) => {
                error!(movie_id = id, "Error loading movie: {}", e);
                state.movie = None;
                state.error = Some("Failed to load movie details. Please try again later.".to_string());
                Err(e)
            }
        }
    }

    /// Like or unlike the held movie. The server does not echo counts, so
    /// the local mirror moves by one.
    pub async fn toggle_like(&self) -> Result<(), RemoteError> {
        let Some(movie) = self.movie().await else {
            return Ok(());
        };
        let toggled = movie.with_like_toggled();
        let result = if movie.user_liked {
            self.gateway.unlike(movie.id).await
        } else {
            self.gateway.like(movie.id).await
        };
        if let Err(e) = result {
            error!(movie_id = movie.id, "Error toggling like: {}", e);
            return Err(e);
        }

        let mut state = self.state.lock().await;
        if let Some(held) = state.movie.as_mut().filter(|m| m.id == movie.id) {
            held.user_liked = toggled.user_liked;
            held.likes_count = toggled.likes_count;
            info!(movie_id = movie.id, liked = held.user_liked, "Like toggled");
        }
        Ok(())
    }

    /// Move the held movie to `status` and adopt the server's copy.
    ///
    /// Watched goes through mark-watched with the held rating and review;
    /// wishlist goes through an update of the editable fields.
    pub async fn change_status(&self, status: MovieStatus) -> Result<(), RemoteError> {
        let Some(movie) = self.movie().await else {
            return Ok(());
        };
        self.state.lock().await.loading = true;

        let result = match status {
            MovieStatus::Watched => {
                self.gateway
                    .mark_watched(movie.id, movie.rating, movie.review.as_deref())
                    .await
            }
            MovieStatus::Wishlist => self.gateway.update(movie.id, &movie.to_draft()).await,
        };

        let mut state = self.state.lock().await;
        state.loading = false;
        match result {
            Ok(updated) => {
                if updated.status == status {
                    info!(movie_id = updated.id, status = %updated.status, "Movie status changed");
                } else {
                    warn!(
                        movie_id = updated.id,
                        requested = %status,
                        status = %updated.status,
                        "Server kept the previous status"
                    );
                }
                state.movie = Some(updated);
                Ok(())
            }
            Err(e) => {
                error!(movie_id = movie.id, "Error updating movie status: {}", e);
                state.error = Some("Failed to update movie status. Please try again.".to_string());
                Err(e)
            }
        }
    }

    /// Post a comment; on success it goes to the top of the thread.
    pub async fn submit_comment(&self, content: &str) -> Result<Option<Comment>, RemoteError> {
        let Some(movie) = self.movie().await else {
            return Ok(None);
        };
        let comment = match self.gateway.add_comment(movie.id, content).await {
            Ok(comment) => comment,
            Err(e) => {
                error!(movie_id = movie.id, "Error adding comment: {}", e);
                self.state.lock().await.comment_error = Some("Failed to add comment.".to_string());
                return Err(e);
            }
        };

        let mut state = self.state.lock().await;
        state.comments.insert(0, comment.clone());
        state.comment_error = None;
        if let Some(held) = state.movie.as_mut() {
            held.comments_count += 1;
        }
        Ok(Some(comment))
    }

    /// Delete the held movie. On success the view has nothing left to show
    /// and the caller should go to the returned destination.
    pub async fn delete_movie(&self) -> Result<Option<Navigation>, RemoteError> {
        let Some(movie) = self.movie().await else {
            return Ok(None);
        };
        if let Err(e) = self.gateway.delete(movie.id).await {
            error!(movie_id = movie.id, "Error deleting movie: {}", e);
            return Err(e);
        }
        info!(movie_id = movie.id, "Movie deleted");
        *self.state.lock().await = DetailState::default();
        Ok(Some(Navigation::Wishlist))
    }

    pub async fn edit_target(&self) -> Option<Navigation> {
        self.movie().await.map(|m| Navigation::Edit(m.id))
    }
}
