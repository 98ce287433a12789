use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use wishlist_gateway::{MovieGateway, RemoteError};
use wishlist_models::{Comment, Movie, MovieDraft, MovieStatus, RegisterRequest};

pub fn movie(id: u64, status: MovieStatus) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        status,
        ..Movie::default()
    }
}

pub fn comment(id: u64, movie_id: u64, content: &str) -> Comment {
    Comment {
        id,
        content: content.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        user_id: Some(0),
        username: Some("guest".to_string()),
        user_profile_picture_url: None,
        movie_id: Some(movie_id),
        movie_title: None,
    }
}

/// In-memory backend. Operations named in `failing` return a transport
/// error; like/unlike wait on `like_gate` when one is installed.
pub struct FakeGateway {
    movies: Mutex<Vec<Movie>>,
    comments: Mutex<HashMap<u64, Vec<Comment>>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicU64,
    like_gate: Option<Arc<Semaphore>>,
}

impl Default for FakeGateway {
    /// Empty backend. Ids handed out by `create` start at 1, never 0.
    fn default() -> Self {
        Self {
            movies: Mutex::new(Vec::new()),
            comments: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            like_gate: None,
        }
    }
}

impl FakeGateway {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let next_id = movies.iter().map(|m| m.id).max().unwrap_or(0) + 100;
        Self {
            movies: Mutex::new(movies),
            next_id: AtomicU64::new(next_id),
            ..Self::default()
        }
    }

    pub fn with_like_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.like_gate = Some(gate);
        self
    }

    pub fn add_comments(&self, movie_id: u64, comments: Vec<Comment>) {
        self.comments.lock().unwrap().insert(movie_id, comments);
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str, detail: String) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(format!("{} {}", operation, detail).trim().to_string());
        if self.failing.lock().unwrap().contains(operation) {
            return Err(RemoteError::transport("connection refused"));
        }
        Ok(())
    }

    fn find(&self, id: u64) -> Result<Movie, RemoteError> {
        self.movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::server(404, "Movie not found"))
    }

    fn by_status(&self, status: MovieStatus) -> Vec<Movie> {
        self.movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.status == status)
            .cloned()
            .collect()
    }

    fn replace(&self, movie: Movie) {
        let mut movies = self.movies.lock().unwrap();
        if let Some(slot) = movies.iter_mut().find(|m| m.id == movie.id) {
            *slot = movie;
        }
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.like_gate {
            let permit = gate.acquire().await.unwrap();
            permit.forget();
        }
    }
}

#[async_trait]
impl MovieGateway for FakeGateway {
    async fn fetch_all(&self) -> Result<Vec<Movie>, RemoteError> {
        self.enter("fetch_all", String::new())?;
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn fetch_one(&self, id: u64) -> Result<Movie, RemoteError> {
        self.enter("fetch_one", id.to_string())?;
        self.find(id)
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie, RemoteError> {
        self.enter("create", draft.title.clone())?;
        let movie = Movie {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: draft.title.clone(),
            genre: draft.genre.clone(),
            release_year: draft.release_year,
            runtime: draft.runtime,
            poster_url: draft.poster_url.clone(),
            status: MovieStatus::Wishlist,
            user_id: Some(0),
            username: Some("guest".to_string()),
            ..Movie::default()
        };
        self.movies.lock().unwrap().push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: u64, draft: &MovieDraft) -> Result<Movie, RemoteError> {
        self.enter("update", id.to_string())?;
        let mut movie = self.find(id)?;
        movie.title = draft.title.clone();
        movie.genre = draft.genre.clone();
        movie.release_year = draft.release_year;
        movie.runtime = draft.runtime;
        movie.poster_url = draft.poster_url.clone();
        movie.rating = draft.rating;
        movie.review = draft.review.clone();
        // Editable fields only; status is left as stored
        self.replace(movie.clone());
        Ok(movie)
    }

    async fn delete(&self, id: u64) -> Result<(), RemoteError> {
        self.enter("delete", id.to_string())?;
        self.movies.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }

    async fn fetch_wishlist(&self) -> Result<Vec<Movie>, RemoteError> {
        self.enter("fetch_wishlist", String::new())?;
        Ok(self.by_status(MovieStatus::Wishlist))
    }

    async fn fetch_watched(&self) -> Result<Vec<Movie>, RemoteError> {
        self.enter("fetch_watched", String::new())?;
        Ok(self.by_status(MovieStatus::Watched))
    }

    async fn mark_watched(
        &self,
        id: u64,
        rating: Option<u8>,
        review: Option<&str>,
    ) -> Result<Movie, RemoteError> {
        self.enter("mark_watched", format!("{} {:?} {:?}", id, rating, review))?;
        let mut movie = self.find(id)?;
        movie.status = MovieStatus::Watched;
        movie.rating = rating;
        movie.review = review.map(str::to_string);
        self.replace(movie.clone());
        Ok(movie)
    }

    async fn search(&self, query: &str) -> Result<serde_json::Value, RemoteError> {
        self.enter("search", query.to_string())?;
        Ok(json!({
            "Search": [
                {"Title": format!("{} One", query), "Year": "2012", "imdbID": "tt0000001", "Poster": "N/A"},
                {"Title": format!("{} Two", query), "Year": "2015–2016", "imdbID": "tt0000002", "Poster": "https://img/two.jpg"}
            ],
            "Response": "True"
        }))
    }

    async fn external_details(&self, imdb_id: &str) -> Result<serde_json::Value, RemoteError> {
        self.enter("external_details", imdb_id.to_string())?;
        Ok(json!({
            "Title": "Details Title",
            "Year": "1999",
            "Runtime": "136 min",
            "Genre": "Action, Sci-Fi",
            "Poster": "N/A",
            "imdbID": imdb_id,
            "Response": "True"
        }))
    }

    async fn like(&self, id: u64) -> Result<(), RemoteError> {
        self.wait_for_gate().await;
        self.enter("like", id.to_string())
    }

    async fn unlike(&self, id: u64) -> Result<(), RemoteError> {
        self.wait_for_gate().await;
        self.enter("unlike", id.to_string())
    }

    async fn add_comment(&self, id: u64, content: &str) -> Result<Comment, RemoteError> {
        self.enter("add_comment", id.to_string())?;
        let created = comment(self.next_id.fetch_add(1, Ordering::SeqCst), id, content);
        self.comments
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn fetch_comments(&self, id: u64) -> Result<Vec<Comment>, RemoteError> {
        self.enter("fetch_comments", id.to_string())?;
        Ok(self.comments.lock().unwrap().get(&id).cloned().unwrap_or_default())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), RemoteError> {
        self.enter("register", request.username.clone())
    }
}
