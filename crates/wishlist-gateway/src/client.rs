use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use wishlist_models::{Comment, Movie, MovieDraft, RegisterRequest};
use crate::api;
use crate::error::RemoteError;
use crate::traits::MovieGateway;

pub fn create_http_client() -> Client {
    Client::builder()
        .user_agent(concat!("movie-wishlist/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// [`MovieGateway`] over the backend's REST API.
#[derive(Clone)]
pub struct HttpMovieGateway {
    client: Arc<Client>,
    base_url: String,
}

impl HttpMovieGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(create_http_client(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieGateway for HttpMovieGateway {
    async fn fetch_all(&self) -> Result<Vec<Movie>, RemoteError> {
        api::get_movies(&self.client, &self.base_url).await
    }

    async fn fetch_one(&self, id: u64) -> Result<Movie, RemoteError> {
        api::get_movie(&self.client, &self.base_url, id).await
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie, RemoteError> {
        api::create_movie(&self.client, &self.base_url, draft).await
    }

    async fn update(&self, id: u64, draft: &MovieDraft) -> Result<Movie, RemoteError> {
        api::update_movie(&self.client, &self.base_url, id, draft).await
    }

    async fn delete(&self, id: u64) -> Result<(), RemoteError> {
        api::delete_movie(&self.client, &self.base_url, id).await
    }

    async fn fetch_wishlist(&self) -> Result<Vec<Movie>, RemoteError> {
        api::get_wishlist(&self.client, &self.base_url).await
    }

    async fn fetch_watched(&self) -> Result<Vec<Movie>, RemoteError> {
        api::get_watched(&self.client, &self.base_url).await
    }

    async fn mark_watched(
        &self,
        id: u64,
        rating: Option<u8>,
        review: Option<&str>,
    ) -> Result<Movie, RemoteError> {
        api::mark_watched(&self.client, &self.base_url, id, rating, review).await
    }

    async fn search(&self, query: &str) -> Result<serde_json::Value, RemoteError> {
        api::search_external(&self.client, &self.base_url, query).await
    }

    async fn external_details(&self, imdb_id: &str) -> Result<serde_json::Value, RemoteError> {
        api::get_external_details(&self.client, &self.base_url, imdb_id).await
    }

    async fn like(&self, id: u64) -> Result<(), RemoteError> {
        api::like_movie(&self.client, &self.base_url, id).await
    }

    async fn unlike(&self, id: u64) -> Result<(), RemoteError> {
        api::unlike_movie(&self.client, &self.base_url, id).await
    }

    async fn add_comment(&self, id: u64, content: &str) -> Result<Comment, RemoteError> {
        api::add_comment(&self.client, &self.base_url, id, content).await
    }

    async fn fetch_comments(&self, id: u64) -> Result<Vec<Comment>, RemoteError> {
        api::get_comments(&self.client, &self.base_url, id).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), RemoteError> {
        api::signup(&self.client, &self.base_url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn movie_json(id: u64, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Alien",
            "genre": "Sci-Fi",
            "releaseYear": 1979,
            "runtime": 117,
            "posterUrl": "",
            "status": status,
            "userId": 1,
            "username": "guest",
            "likesCount": 0,
            "commentsCount": 0,
            "userLiked": false
        })
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = HttpMovieGateway::new("http://localhost:8080/");
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_fetch_wishlist() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/wishlist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([movie_json(1, "WISHLIST"), movie_json(2, "WISHLIST")])))
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let movies = gateway.fetch_wishlist().await.unwrap();
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_create_sends_only_editable_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/movies"))
            .and(body_json(json!({"title": "Alien", "releaseYear": 1979, "runtime": 117})))
            .respond_with(ResponseTemplate::new(201).set_body_json(movie_json(42, "WISHLIST")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let draft = MovieDraft {
            release_year: Some(1979),
            runtime: Some(117),
            ..MovieDraft::new("Alien")
        };
        let created = gateway.create(&draft).await.unwrap();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_mark_watched_passes_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/movies/7/mark-watched"))
            .and(query_param("rating", "9"))
            .and(query_param("review", "Great ending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(movie_json(7, "WATCHED")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let movie = gateway.mark_watched(7, Some(9), Some("Great ending")).await.unwrap();
        assert_eq!(movie.status, wishlist_models::MovieStatus::Watched);
    }

    #[tokio::test]
    async fn test_search_returns_provider_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/omdb/search"))
            .and(query_param("query", "Star Wars"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Search": [], "Response": "True"})))
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let payload = gateway.search("Star Wars").await.unwrap();
        assert_eq!(payload["Response"], "True");
    }

    #[tokio::test]
    async fn test_like_and_unlike_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/social/movies/3/like"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "Movie liked successfully"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/social/movies/3/unlike"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "Movie unliked successfully"})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        gateway.like(3).await.unwrap();
        gateway.unlike(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_comment_posts_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/social/movies/9/comments"))
            .and(body_json(json!({"content": "Loved it"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1,
                "content": "Loved it",
                "createdAt": "2024-03-01T10:15:30Z",
                "userId": 1,
                "username": "guest",
                "movieId": 9,
                "movieTitle": "Alien"
            })))
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let comment = gateway.add_comment(9, "Loved it").await.unwrap();
        assert_eq!(comment.content, "Loved it");
    }

    #[tokio::test]
    async fn test_fetch_all_and_fetch_watched_routes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([movie_json(1, "WISHLIST"), movie_json(2, "WATCHED")])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/movies/watched"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([movie_json(2, "WATCHED")])))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        assert_eq!(gateway.fetch_all().await.unwrap().len(), 2);
        let watched = gateway.fetch_watched().await.unwrap();
        assert_eq!(watched[0].status, wishlist_models::MovieStatus::Watched);
    }

    #[tokio::test]
    async fn test_fetch_one_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(movie_json(5, "WISHLIST")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let movie = gateway.fetch_one(5).await.unwrap();
        assert_eq!(movie.id, 5);
        assert_eq!(movie.title, "Alien");
    }

    #[tokio::test]
    async fn test_update_puts_only_editable_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/movies/5"))
            .and(body_json(json!({
                "title": "Alien",
                "genre": "Sci-Fi",
                "releaseYear": 1979,
                "runtime": 117,
                "posterUrl": "",
                "rating": 8,
                "review": "Still scary"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(movie_json(5, "WATCHED")))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        // Server-managed fields on the movie must not leak into the body
        let mut movie: Movie = serde_json::from_value(movie_json(5, "WATCHED")).unwrap();
        movie.likes_count = 12;
        movie.comments_count = 3;
        movie.rating = Some(8);
        movie.review = Some("Still scary".to_string());
        let updated = gateway.update(5, &movie.to_draft()).await.unwrap();
        assert_eq!(updated.id, 5);
    }

    #[tokio::test]
    async fn test_delete_route() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/movies/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "Movie deleted successfully"})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        gateway.delete(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_comments_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/social/movies/9/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "content": "Second", "createdAt": "2024-03-02T10:00:00Z", "movieId": 9},
                {"id": 1, "content": "First", "createdAt": "2024-03-01T10:00:00Z", "movieId": 9}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let comments = gateway.fetch_comments(9).await.unwrap();
        assert_eq!(comments.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_external_details_escapes_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/omdb/details/tt0848228"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Title": "The Avengers", "imdbID": "tt0848228", "Response": "True"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/omdb/details/tt1%2F2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Response": "False"})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let payload = gateway.external_details("tt0848228").await.unwrap();
        assert_eq!(payload["Title"], "The Avengers");
        // A slash stays inside the one path segment
        let payload = gateway.external_details("tt1/2").await.unwrap();
        assert_eq!(payload["Response"], "False");
    }

    #[tokio::test]
    async fn test_register_posts_signup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signup"))
            .and(body_json(json!({"username": "ripley", "email": "ripley@nostromo.space", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "User registered successfully"})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let request = RegisterRequest {
            username: "ripley".to_string(),
            email: "ripley@nostromo.space".to_string(),
            password: "hunter22".to_string(),
        };
        gateway.register(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"success": false, "message": "Movie not found"})))
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let err = gateway.fetch_one(99).await.unwrap_err();
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.message, "Error Code: 404 - Movie not found");
    }

    #[tokio::test]
    async fn test_transport_error_is_normalized() {
        // Nothing listens on port 9 (discard) on test machines
        let gateway = HttpMovieGateway::new("http://127.0.0.1:9");
        let err = gateway.fetch_watched().await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.message.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_class() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/watched"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let gateway = HttpMovieGateway::new(server.uri());
        let err = gateway.fetch_watched().await.unwrap_err();
        assert_eq!(err.status_code, None);
    }
}
