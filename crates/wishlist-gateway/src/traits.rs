use async_trait::async_trait;
use wishlist_models::{Comment, Movie, MovieDraft, RegisterRequest};
use crate::error::RemoteError;

/// One call per remote capability of the movie backend.
///
/// Implementations hold no state between calls and make exactly one
/// attempt per call. Like state is tracked by the caller.
#[async_trait]
pub trait MovieGateway: Send + Sync {
    // Movie collection
    async fn fetch_all(&self) -> Result<Vec<Movie>, RemoteError>;
    async fn fetch_one(&self, id: u64) -> Result<Movie, RemoteError>;
    async fn create(&self, draft: &MovieDraft) -> Result<Movie, RemoteError>;
    async fn update(&self, id: u64, draft: &MovieDraft) -> Result<Movie, RemoteError>;
    async fn delete(&self, id: u64) -> Result<(), RemoteError>;
    async fn fetch_wishlist(&self) -> Result<Vec<Movie>, RemoteError>;
    async fn fetch_watched(&self) -> Result<Vec<Movie>, RemoteError>;

    /// `rating` is sent when present, `review` only when non-empty.
    async fn mark_watched(
        &self,
        id: u64,
        rating: Option<u8>,
        review: Option<&str>,
    ) -> Result<Movie, RemoteError>;

    // Metadata provider proxy; payloads are provider-shaped and left opaque
    async fn search(&self, query: &str) -> Result<serde_json::Value, RemoteError>;
    async fn external_details(&self, imdb_id: &str) -> Result<serde_json::Value, RemoteError>;

    // Social
    async fn like(&self, id: u64) -> Result<(), RemoteError>;
    async fn unlike(&self, id: u64) -> Result<(), RemoteError>;
    async fn add_comment(&self, id: u64, content: &str) -> Result<Comment, RemoteError>;
    async fn fetch_comments(&self, id: u64) -> Result<Vec<Comment>, RemoteError>;

    // Account
    async fn register(&self, request: &RegisterRequest) -> Result<(), RemoteError>;
}
