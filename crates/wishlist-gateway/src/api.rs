use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use wishlist_models::{Comment, Movie, MovieDraft, RegisterRequest};
use crate::error::RemoteError;

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    content: &'a str,
}

/// Send once and turn anything but a 2xx into a [`RemoteError`].
async fn send(request: RequestBuilder, action: &str) -> Result<Response, RemoteError> {
    let response = request.send().await.map_err(|e| {
        let err = RemoteError::transport(&e);
        error!("Failed to {}: {}", action, err);
        err
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        let err = RemoteError::server(status.as_u16(), &error_text);
        error!(status = status.as_u16(), "Failed to {}: {}", action, err);
        return Err(err);
    }

    Ok(response)
}

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, RemoteError> {
    response.json::<T>().await.map_err(|e| {
        let err = RemoteError::transport(&e);
        error!("Failed to decode response to {}: {}", action, err);
        err
    })
}

fn movies_url(base_url: &str) -> String {
    format!("{}/api/movies", base_url)
}

fn social_url(base_url: &str, id: u64) -> String {
    format!("{}/api/social/movies/{}", base_url, id)
}

/// Query pairs for mark-watched: rating when present, review when non-empty
pub fn mark_watched_query(rating: Option<u8>, review: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(rating) = rating {
        params.push(("rating", rating.to_string()));
    }
    if let Some(review) = review.filter(|r| !r.is_empty()) {
        params.push(("review", review.to_string()));
    }
    params
}

pub async fn get_movies(client: &Client, base_url: &str) -> Result<Vec<Movie>, RemoteError> {
    debug!("GET /api/movies");
    let response = send(client.get(movies_url(base_url)), "fetch movies").await?;
    read_json(response, "fetch movies").await
}

pub async fn get_movie(client: &Client, base_url: &str, id: u64) -> Result<Movie, RemoteError> {
    debug!(movie_id = id, "GET /api/movies/{{id}}");
    let url = format!("{}/{}", movies_url(base_url), id);
    let response = send(client.get(&url), "fetch movie").await?;
    read_json(response, "fetch movie").await
}

pub async fn create_movie(client: &Client, base_url: &str, draft: &MovieDraft) -> Result<Movie, RemoteError> {
    debug!(title = %draft.title, "POST /api/movies");
    let response = send(client.post(movies_url(base_url)).json(draft), "add movie").await?;
    read_json(response, "add movie").await
}

pub async fn update_movie(
    client: &Client,
    base_url: &str,
    id: u64,
    draft: &MovieDraft,
) -> Result<Movie, RemoteError> {
    debug!(movie_id = id, "PUT /api/movies/{{id}}");
    let url = format!("{}/{}", movies_url(base_url), id);
    let response = send(client.put(&url).json(draft), "update movie").await?;
    read_json(response, "update movie").await
}

pub async fn delete_movie(client: &Client, base_url: &str, id: u64) -> Result<(), RemoteError> {
    debug!(movie_id = id, "DELETE /api/movies/{{id}}");
    let url = format!("{}/{}", movies_url(base_url), id);
    send(client.delete(&url), "delete movie").await?;
    Ok(())
}

pub async fn mark_watched(
    client: &Client,
    base_url: &str,
    id: u64,
    rating: Option<u8>,
    review: Option<&str>,
) -> Result<Movie, RemoteError> {
    debug!(movie_id = id, ?rating, "PUT /api/movies/{{id}}/mark-watched");
    let url = format!("{}/{}/mark-watched", movies_url(base_url), id);
    let request = client
        .put(&url)
        .query(&mark_watched_query(rating, review))
        .json(&serde_json::json!({}));
    let response = send(request, "mark movie as watched").await?;
    read_json(response, "mark movie as watched").await
}

pub async fn get_wishlist(client: &Client, base_url: &str) -> Result<Vec<Movie>, RemoteError> {
    debug!("GET /api/movies/wishlist");
    let url = format!("{}/wishlist", movies_url(base_url));
    let response = send(client.get(&url), "fetch wishlist").await?;
    read_json(response, "fetch wishlist").await
}

pub async fn get_watched(client: &Client, base_url: &str) -> Result<Vec<Movie>, RemoteError> {
    debug!("GET /api/movies/watched");
    let url = format!("{}/watched", movies_url(base_url));
    let response = send(client.get(&url), "fetch watched movies").await?;
    read_json(response, "fetch watched movies").await
}

pub async fn search_external(client: &Client, base_url: &str, query: &str) -> Result<serde_json::Value, RemoteError> {
    debug!(query, "GET /api/omdb/search");
    let url = format!("{}/api/omdb/search", base_url);
    let response = send(client.get(&url).query(&[("query", query)]), "search movies").await?;
    read_json(response, "search movies").await
}

pub async fn get_external_details(
    client: &Client,
    base_url: &str,
    imdb_id: &str,
) -> Result<serde_json::Value, RemoteError> {
    debug!(imdb_id, "GET /api/omdb/details/{{imdbId}}");
    let url = format!("{}/api/omdb/details/{}", base_url, urlencoding::encode(imdb_id));
    let response = send(client.get(&url), "fetch movie details").await?;
    read_json(response, "fetch movie details").await
}

pub async fn like_movie(client: &Client, base_url: &str, id: u64) -> Result<(), RemoteError> {
    debug!(movie_id = id, "POST /api/social/movies/{{id}}/like");
    let url = format!("{}/like", social_url(base_url, id));
    send(client.post(&url).json(&serde_json::json!({})), "like movie").await?;
    Ok(())
}

pub async fn unlike_movie(client: &Client, base_url: &str, id: u64) -> Result<(), RemoteError> {
    debug!(movie_id = id, "DELETE /api/social/movies/{{id}}/unlike");
    let url = format!("{}/unlike", social_url(base_url, id));
    send(client.delete(&url), "unlike movie").await?;
    Ok(())
}

pub async fn add_comment(client: &Client, base_url: &str, id: u64, content: &str) -> Result<Comment, RemoteError> {
    debug!(movie_id = id, "POST /api/social/movies/{{id}}/comments");
    let url = format!("{}/comments", social_url(base_url, id));
    let response = send(client.post(&url).json(&CommentRequest { content }), "add comment").await?;
    read_json(response, "add comment").await
}

pub async fn get_comments(client: &Client, base_url: &str, id: u64) -> Result<Vec<Comment>, RemoteError> {
    debug!(movie_id = id, "GET /api/social/movies/{{id}}/comments");
    let url = format!("{}/comments", social_url(base_url, id));
    let response = send(client.get(&url), "fetch comments").await?;
    read_json(response, "fetch comments").await
}

pub async fn signup(client: &Client, base_url: &str, request: &RegisterRequest) -> Result<(), RemoteError> {
    debug!(username = %request.username, "POST /api/auth/signup");
    let url = format!("{}/api/auth/signup", base_url);
    send(client.post(&url).json(request), "register").await?;
    Ok(())
}
