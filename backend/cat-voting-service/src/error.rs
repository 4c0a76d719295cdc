/// Error types for Cat Voting Service
///
/// Every failure that reaches the HTTP boundary is an `AppError`. The
/// response body is always `{"message": ...}`. Server-side details are
/// logged, never echoed to the client.
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::cat_api::CatApiError;
use crate::db::StoreError;
use crate::models::{
    MessageResponse, MSG_FETCH_FAILED, MSG_INTERNAL_ERROR, MSG_INVALID_BODY,
    MSG_UPSTREAM_INVALID,
};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request passed deserialization but violates a business rule
    #[error("{0}")]
    Validation(String),

    /// Request body could not be deserialized
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The image provider answered with a non-200 status or not at all
    #[error("Image provider unavailable")]
    UpstreamUnavailable,

    /// The image provider answered 200 with a body we could not decode
    #[error("Image provider returned an invalid response: {0}")]
    UpstreamInvalid(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message exposed to API clients
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidBody(_) => MSG_INVALID_BODY.to_string(),
            AppError::UpstreamUnavailable => MSG_FETCH_FAILED.to_string(),
            AppError::UpstreamInvalid(_) => MSG_UPSTREAM_INVALID.to_string(),
            AppError::Store(_) | AppError::Internal(_) => MSG_INTERNAL_ERROR.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamInvalid(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamUnavailable | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        HttpResponse::build(status).json(MessageResponse::new(self.public_message()))
    }
}

impl From<CatApiError> for AppError {
    fn from(err: CatApiError) -> Self {
        match err {
            CatApiError::Parse(msg) => AppError::UpstreamInvalid(msg),
            CatApiError::Client(e) => AppError::Internal(e.to_string()),
        }
    }
}
