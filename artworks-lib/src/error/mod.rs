//! Error types

mod api;

pub use api::*;

/// Top-level error type for the artworks client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error while talking to the artworks API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client or request configuration was rejected before sending.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns `true` if the response could not be mapped onto the record schema.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Api(ApiError::Parse { .. }))
    }

    /// Returns the HTTP status code if the server rejected the request.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            Self::InvalidConfig(_) => None,
        }
    }
}
