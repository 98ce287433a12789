use chrono::Datelike;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};
use wishlist_gateway::{MovieGateway, RemoteError};
use wishlist_models::{MovieDraft, ValidationError};
use crate::navigation::Navigation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[derive(Default)]
struct FormState {
    draft: MovieDraft,
    submitting: bool,
    error: Option<String>,
}

/// Create/edit form for a single movie.
pub struct MovieFormViewModel<G: MovieGateway> {
    gateway: Arc<G>,
    mode: FormMode,
    state: Mutex<FormState>,
}

impl<G: MovieGateway> MovieFormViewModel<G> {
    pub fn create(gateway: Arc<G>) -> Self {
        Self::new(gateway, FormMode::Create)
    }

    pub fn edit(gateway: Arc<G>, id: u64) -> Self {
        Self::new(gateway, FormMode::Edit(id))
    }

    pub fn new(gateway: Arc<G>, mode: FormMode) -> Self {
        Self {
            gateway,
            mode,
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub async fn draft(&self) -> MovieDraft {
        self.state.lock().await.draft.clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.state.lock().await.submitting
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// Prefill the draft from the server copy. Does nothing in create mode.
    pub async fn load(&self) -> Result<(), RemoteError> {
        let FormMode::Edit(id) = self.mode else {
            return Ok(());
        };
        match self.gateway.fetch_one(id).await {
            Ok(movie) => {
                let mut state = self.state.lock().await;
                state.draft = movie.to_draft();
                state.error = None;
                Ok(())
            }
            Err(e) => {
                error!(movie_id = id, "Error loading movie for edit: {}", e);
                self.state.lock().await.error =
                    Some("Failed to load movie details. Please try again later.".to_string());
                Err(e)
            }
        }
    }

    /// Validate and send `draft`. Invalid drafts never reach the gateway.
    pub async fn submit(&self, draft: MovieDraft) -> Result<Navigation, FormError> {
        draft.validate(chrono::Utc::now().year())?;
        {
            let mut state = self.state.lock().await;
            state.draft = draft.clone();
            state.submitting = true;
            state.error = None;
        }

        let result = match self.mode {
            FormMode::Create => self.gateway.create(&draft).await,
            FormMode::Edit(id) => self.gateway.update(id, &draft).await,
        };

        let mut state = self.state.lock().await;
        state.submitting = false;
        match result {
            Ok(movie) => {
                info!(movie_id = movie.id, title = %movie.title, "Movie saved");
                Ok(Navigation::Detail(movie.id))
            }
            Err(e) => {
                let message = match self.mode {
                    FormMode::Create => "Failed to add movie. Please try again later.",
                    FormMode::Edit(_) => "Failed to update movie. Please try again later.",
                };
                error!("Error saving movie: {}", e);
                state.error = Some(message.to_string());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, FakeGateway};
    use wishlist_models::MovieStatus;

    #[tokio::test]
    async fn test_create_navigates_to_new_movie() {
        let gateway = Arc::new(FakeGateway::with_movies(vec![movie(1, MovieStatus::Wishlist)]));
        let form = MovieFormViewModel::create(gateway.clone());

        let mut draft = MovieDraft::new("Heat");
        draft.release_year = Some(1995);
        let next = form.submit(draft).await.unwrap();

        let Navigation::Detail(id) = next else {
            panic!("expected detail navigation, got {:?}", next);
        };
        assert_eq!(gateway.fetch_one(id).await.unwrap().title, "Heat");
        assert!(!form.is_submitting().await);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let gateway = Arc::new(FakeGateway::default());
        let form = MovieFormViewModel::create(gateway.clone());

        let result = form.submit(MovieDraft::new("  ")).await;
        assert!(matches!(result, Err(FormError::Invalid(ValidationError::Required("title")))));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_edit_prefills_and_updates() {
        let mut m = movie(4, MovieStatus::Wishlist);
        m.genre = Some("Drama".to_string());
        let gateway = Arc::new(FakeGateway::with_movies(vec![m]));
        let form = MovieFormViewModel::edit(gateway.clone(), 4);

        form.load().await.unwrap();
        let mut draft = form.draft().await;
        assert_eq!(draft.genre.as_deref(), Some("Drama"));

        draft.title = "Renamed".to_string();
        assert_eq!(form.submit(draft).await.unwrap(), Navigation::Detail(4));
        assert_eq!(gateway.fetch_one(4).await.unwrap().title, "Renamed");
    }

    #[tokio::test]
    async fn test_failed_submit_records_message() {
        let gateway = Arc::new(FakeGateway::with_movies(vec![movie(4, MovieStatus::Wishlist)]));
        gateway.fail("create");
        gateway.fail("update");

        let create = MovieFormViewModel::create(gateway.clone());
        assert!(matches!(create.submit(MovieDraft::new("Heat")).await, Err(FormError::Remote(_))));
        assert_eq!(
            create.error().await.as_deref(),
            Some("Failed to add movie. Please try again later.")
        );

        let edit = MovieFormViewModel::edit(gateway, 4);
        assert!(edit.submit(MovieDraft::new("Heat")).await.is_err());
        assert_eq!(
            edit.error().await.as_deref(),
            Some("Failed to update movie. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_create_mode_load_is_noop() {
        let gateway = Arc::new(FakeGateway::default());
        let form = MovieFormViewModel::create(gateway.clone());
        form.load().await.unwrap();
        assert_eq!(form.mode(), FormMode::Create);
        assert!(gateway.calls().is_empty());
    }
}
