use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::draft::MovieDraft;
use crate::status::MovieStatus;

/// A movie as the backend returns it.
///
/// `id == 0` marks a movie that has not been saved yet. Counts and
/// `user_liked` are owned by the server; the client only mirrors them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub runtime: Option<u32>, // minutes
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub status: MovieStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>, // 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub user_liked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Movie {
    pub fn with_status(&self, status: MovieStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Flip `user_liked` and move `likes_count` by one in the matching
    /// direction. The count never goes below zero.
    pub fn with_like_toggled(&self) -> Self {
        let (user_liked, likes_count) = if self.user_liked {
            (false, self.likes_count.saturating_sub(1))
        } else {
            (true, self.likes_count + 1)
        };
        Self {
            user_liked,
            likes_count,
            ..self.clone()
        }
    }

    /// The editable subset of this movie, as sent on create/update.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            genre: self.genre.clone(),
            release_year: self.release_year,
            runtime: self.runtime,
            poster_url: self.poster_url.clone(),
            rating: self.rating,
            review: self.review.clone(),
        }
    }
}
