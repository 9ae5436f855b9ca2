use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("Amount below minimum withdrawal: requested {requested}, minimum {minimum}")]
    BelowMinimum { requested: i64, minimum: i64 },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::PermissionDenied => {
                log::warn!("Permission denied");
                (
                    actix_web::http::StatusCode::FORBIDDEN,
                    "PERMISSION_DENIED",
                    "Permission denied".to_string(),
                )
            }
            AppError::InsufficientBalance { .. } => {
                log::warn!("{self}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "INSUFFICIENT_BALANCE",
                    self.to_string(),
                )
            }
            AppError::BelowMinimum { .. } => {
                log::warn!("{self}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "BELOW_MINIMUM",
                    self.to_string(),
                )
            }
            AppError::InvalidTransition(msg) => {
                log::warn!("Invalid transition: {msg}");
                (
                    actix_web::http::StatusCode::CONFLICT,
                    "INVALID_TRANSITION",
                    msg.clone(),
                )
            }
            AppError::StoreUnavailable(err) => {
                log::error!("Store unavailable: {err}");
                (
                    actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Record store unavailable".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_withdrawal_errors_map_to_specific_codes() {
        let err = AppError::InsufficientBalance {
            requested: 1_000_001,
            available: 1_000_000,
        };
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::BelowMinimum {
            requested: 10_000,
            minimum: 50_000,
        };
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::InvalidTransition("already rejected".to_string());
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_unavailable_is_not_a_client_error() {
        let err = AppError::StoreUnavailable(sea_orm::DbErr::Custom("conn refused".to_string()));
        assert_eq!(
            err.error_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
