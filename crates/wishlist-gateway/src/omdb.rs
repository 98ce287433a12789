//! Normalization of metadata-provider payloads returned by the search and
//! details proxies. The provider uses capitalized keys (`Title`, `imdbID`)
//! and the string "N/A" for missing values.

use serde_json::Value;
use wishlist_models::{clean_provider_value, ExternalCandidate};

fn field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .map(clean_provider_value)
        .unwrap_or_default()
}

fn optional_field(item: &Value, key: &str) -> Option<String> {
    let value = field(item, key);
    (!value.is_empty()).then_some(value)
}

fn is_failed_response(payload: &Value) -> bool {
    payload.get("Response").and_then(Value::as_str) == Some("False")
}

/// Candidates from a search payload, in provider order. A failed or
/// malformed payload yields no candidates.
pub fn normalize_search_results(payload: &Value) -> Vec<ExternalCandidate> {
    if is_failed_response(payload) {
        return Vec::new();
    }
    let Some(results) = payload.get("Search").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .map(|item| ExternalCandidate {
            external_id: field(item, "imdbID"),
            title: field(item, "Title"),
            year: field(item, "Year"),
            poster_url: field(item, "Poster"),
            genre: None,
            runtime: None,
        })
        .filter(|candidate| !candidate.external_id.is_empty())
        .collect()
}

/// Candidate from a details payload, including genre and runtime
pub fn normalize_details(payload: &Value) -> Option<ExternalCandidate> {
    if is_failed_response(payload) {
        return None;
    }
    let external_id = field(payload, "imdbID");
    if external_id.is_empty() {
        return None;
    }
    Some(ExternalCandidate {
        external_id,
        title: field(payload, "Title"),
        year: field(payload, "Year"),
        poster_url: field(payload, "Poster"),
        genre: optional_field(payload, "Genre"),
        runtime: optional_field(payload, "Runtime"),
    })
}
