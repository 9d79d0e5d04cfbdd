use crate::auth::AuthError;
use crate::metrics::REQUEST_ERRORS;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input format: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Conflict(_) => "conflict",
            ApiError::RateLimited => "rate_limited",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        REQUEST_ERRORS.with_label_values(&[self.kind()]).inc();

        let body = match self {
            ApiError::InvalidInput(_) => json!({"error": "Invalid input format"}),
            ApiError::Unauthorized(msg) | ApiError::BadRequest(msg) | ApiError::Conflict(msg) => {
                json!({"message": msg})
            }
            ApiError::RateLimited => json!({"error": "Rate limit exceeded"}),
            ApiError::Internal(detail) => {
                // Detail stays in the logs
                error!("Request failed: {}", detail);
                json!({"error": "Internal server error"})
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<risk_engine::Error> for ApiError {
    fn from(err: risk_engine::Error) -> Self {
        match err {
            risk_engine::Error::InvalidInput(msg) => ApiError::InvalidInput(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized("Token is missing!".to_string()),
            AuthError::InvalidToken(_) => ApiError::Unauthorized("Token is invalid!".to_string()),
            AuthError::MissingCredentials => ApiError::Unauthorized("Could not verify".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::MissingFields => ApiError::BadRequest("Missing required fields".to_string()),
            AuthError::UserExists => ApiError::Conflict("User already exists".to_string()),
            AuthError::TokenIssue(e) => ApiError::Internal(format!("token encoding failed: {}", e)),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> serde_json::Value {
        let resp = err.error_response();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let err = ApiError::Internal("classifier exploded at 0xdeadbeef".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(err).await;
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[actix_web::test]
    async fn test_invalid_input_body() {
        let err = ApiError::from(risk_engine::Error::InvalidInput("expected 5".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(err).await, json!({"error": "Invalid input format"}));
    }

    #[test]
    fn test_classifier_error_is_internal() {
        let err = ApiError::from(risk_engine::Error::Classifier("down".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            ApiError::from(AuthError::UserExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(AuthError::MissingFields).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
