use serde::{Deserialize, Serialize};
use std::fmt;

/// Which list a movie belongs to. The backend only ever moves a movie
/// between these two states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieStatus {
    /// Want to watch
    #[default]
    Wishlist,
    /// Already seen, may carry a rating and review
    Watched,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::Wishlist => "WISHLIST",
            MovieStatus::Watched => "WATCHED",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
