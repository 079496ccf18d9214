use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boc_rates::RateError;
use thiserror::Error;

use crate::models::RateResponse;

pub const INVALID_FORMAT_MESSAGE: &str =
    "Invalid currency code format. Please provide a 3-letter currency code.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error(transparent)]
    Rate(#[from] RateError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rate(RateError::UnsupportedCurrency(_)) => StatusCode::BAD_REQUEST,
            ApiError::Rate(RateError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Rate(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the log.
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };
        let body = Json(RateResponse::failure(status.as_u16(), message));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
