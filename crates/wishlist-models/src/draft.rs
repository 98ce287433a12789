use serde::{Deserialize, Serialize};
use crate::validation::{check_max_len, check_range, ValidationError};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_GENRE_LEN: usize = 100;
pub const MAX_POSTER_URL_LEN: usize = 255;
pub const MAX_REVIEW_LEN: usize = 1000;
pub const MIN_RELEASE_YEAR: i32 = 1900;

/// Editable subset of a movie. This is the only shape ever sent on create
/// or update; ids, counts, owner and timestamps stay on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl MovieDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Field-level checks the movie form applies before anything is sent.
    ///
    /// `current_year` bounds the release year (up to five years ahead).
    pub fn validate(&self, current_year: i32) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("title"));
        }
        check_max_len("title", &self.title, MAX_TITLE_LEN)?;
        if let Some(genre) = &self.genre {
            check_max_len("genre", genre, MAX_GENRE_LEN)?;
        }
        if let Some(year) = self.release_year {
            check_range("releaseYear", year as i64, MIN_RELEASE_YEAR as i64, (current_year + 5) as i64)?;
        }
        if let Some(runtime) = self.runtime {
            check_range("runtime", runtime as i64, 1, 999)?;
        }
        if let Some(poster_url) = &self.poster_url {
            check_max_len("posterUrl", poster_url, MAX_POSTER_URL_LEN)?;
        }
        if let Some(rating) = self.rating {
            check_range("rating", rating as i64, 1, 10)?;
        }
        if let Some(review) = &self.review {
            check_max_len("review", review, MAX_REVIEW_LEN)?;
        }
        Ok(())
    }
}
