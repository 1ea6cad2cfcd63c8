use thiserror::Error;

use axum_web::erring::HTTPError;

pub mod frontmatter;
pub mod id;
pub mod loader;
pub mod normalize;
pub mod record;
pub mod service;

pub use normalize::{BodyFormat, Normalizer};
pub use record::{Bilingual, BookFields, ContentRecord, ContentType, Language, PostFields, TypeFields};
pub use service::ContentService;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Invalid type parameter. Use: articles, blog, or books.")]
    InvalidType(String),

    #[error("{0} item not found")]
    NotFound(String),

    #[error("invalid front-matter: {0}")]
    FrontMatter(String),

    #[error("invalid date {0:?}")]
    InvalidDate(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ContentError> for HTTPError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::InvalidType(_) => HTTPError::new(400, err.to_string()),
            ContentError::NotFound(_) => HTTPError::new(404, err.to_string()),
            _ => HTTPError::internal(err.to_string()),
        }
    }
}
