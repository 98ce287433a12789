pub mod candidate;
pub mod comment;
pub mod draft;
pub mod movie;
pub mod status;
pub mod user;
pub mod validation;

pub use candidate::{clean_provider_value, ExternalCandidate, PROVIDER_SENTINEL};
pub use comment::Comment;
pub use draft::MovieDraft;
pub use movie::Movie;
pub use status::MovieStatus;
pub use user::{RegisterRequest, Session, User};
pub use validation::{validate_comment, ValidationError};
