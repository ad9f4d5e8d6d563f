use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gateway::GatewayError;
use thiserror::Error;

use crate::render::layout;

/// Errors that abort a request outright (page loads, malformed input).
///
/// Mutation handlers mostly surface failures inline (banner on a re-render,
/// flash on a redirect), so this type carries the cases where there is
/// nothing sensible left to render.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(what) => {
                tracing::debug!(what = %what, "not found");
                (
                    StatusCode::NOT_FOUND,
                    "요청한 항목을 찾을 수 없습니다.".to_string(),
                )
            }
            ApiError::BadRequest(detail) => {
                tracing::debug!(detail = %detail, "bad request");
                (StatusCode::BAD_REQUEST, "잘못된 요청입니다.".to_string())
            }
            ApiError::Gateway(err) => {
                tracing::error!(error = %err, "gateway request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("서버와 통신 중 오류가 발생했습니다: {err}"),
                )
            }
        };

        (status, layout::error_response(status, &message)).into_response()
    }
}
