use std::fmt;

/// Destinations a view-model can ask its caller to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Wishlist,
    Watched,
    Discover,
    Detail(u64),
    Edit(u64),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Wishlist => "/movies/wishlist".to_string(),
            Navigation::Watched => "/movies/watched".to_string(),
            Navigation::Discover => "/movies/discover".to_string(),
            Navigation::Detail(id) => format!("/movies/detail/{}", id),
            Navigation::Edit(id) => format!("/movies/edit/{}", id),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
