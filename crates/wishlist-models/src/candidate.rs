use serde::{Deserialize, Serialize};
use crate::draft::MovieDraft;

/// Value the metadata provider uses for "no data".
pub const PROVIDER_SENTINEL: &str = "N/A";

/// An unsaved search result from the metadata provider, identified by its
/// external id (e.g. "tt0088763"). It only becomes a [`crate::Movie`]
/// once it has been posted to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExternalCandidate {
    pub external_id: String,
    pub title: String,
    /// Raw provider year, e.g. "1985" or "2008–2013"
    pub year: String,
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Raw provider runtime, e.g. "116 min"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

impl ExternalCandidate {
    /// Convert into a draft for the wishlist. Numbers are read from the
    /// leading digits of the provider strings; anything else becomes 0.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: clean_provider_value(&self.title),
            genre: Some(self.genre.as_deref().map(clean_provider_value).unwrap_or_default()),
            release_year: Some(
                parse_leading_number(&self.year)
                    .and_then(|year| i32::try_from(year).ok())
                    .unwrap_or(0),
            ),
            runtime: Some(
                self.runtime
                    .as_deref()
                    .and_then(parse_leading_number)
                    .unwrap_or(0),
            ),
            poster_url: Some(clean_provider_value(&self.poster_url)),
            rating: None,
            review: None,
        }
    }
}

/// Maps the provider's "N/A" sentinel to an empty string.
pub fn clean_provider_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed == PROVIDER_SENTINEL {
        String::new()
    } else {
        trimmed.to_string()
    }
}

fn parse_leading_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
