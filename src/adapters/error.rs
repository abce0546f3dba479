use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApplicationError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            ApplicationError::InvalidCredentials => {
                warn!("Invalid login attempt");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Invalid email or password" }),
                )
            }
            ApplicationError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            ApplicationError::Unauthorized(msg) => {
                warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, json!({ "message": msg }))
            }
            ApplicationError::Forbidden(msg) => {
                warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, json!({ "message": msg }))
            }
            ApplicationError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, json!({ "message": msg }))
            }
            ApplicationError::DatabaseError(msg)
            | ApplicationError::CacheError(msg)
            | ApplicationError::InternalError(msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server Error", "error": msg }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
