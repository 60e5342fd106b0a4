//! Error taxonomy and the single error → HTTP translation layer.

use hyper::{Body, Response, StatusCode, header::CONTENT_TYPE};
use thiserror::Error;

use crate::sys_videoapi::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input; no side effects occurred.
    #[error("{0}")]
    BadRequest(String),
    /// The referenced video does not exist; no side effects occurred.
    #[error("{0}")]
    NotFound(String),
    #[error("invalid form data: {0}")]
    Multipart(#[from] multer::Error),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Io(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Uniform JSON error body, the same shape for every handler.
    pub fn to_response(&self) -> Response<Body> {
        let body = serde_json::json!({ "success": false, "error": self.to_string() });
        Response::builder()
            .status(self.status())
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
