use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a movie. Identity and timestamp come from the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile_picture_url: Option<String>,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub movie_title: Option<String>,
}
