//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keeper_core::KeeperError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub KeeperError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            KeeperError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            KeeperError::NotFound(_) => StatusCode::NOT_FOUND,
            KeeperError::Timeout | KeeperError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}
