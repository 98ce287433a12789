pub mod api;
pub mod client;
pub mod error;
pub mod omdb;
pub mod traits;

pub use client::{create_http_client, HttpMovieGateway};
pub use error::RemoteError;
pub use omdb::{normalize_details, normalize_search_results};
pub use traits::MovieGateway;
