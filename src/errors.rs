use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors as seen by HTTP clients. Every variant renders as
/// `{"detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::CustomerNotFound | DomainError::OrderNotFound => {
                AppError::NotFound(e.to_string())
            }
            DomainError::EmailTaken => AppError::Conflict(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::Unprocessable(msg),
            DomainError::ProductNotFound(_) => AppError::BadRequest(e.to_string()),
            DomainError::ProductServiceUnavailable(_) => {
                AppError::ServiceUnavailable("Product service unavailable".to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            AppError::Internal(msg) => {
                log::error!("Request failed: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "detail": detail }))
    }
}

// Extractor failures (bad JSON, non-numeric ids, bad query strings) share the
// `detail` shape of handler errors.

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Unprocessable(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Unprocessable(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Unprocessable(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Customer not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn body_carries_detail() {
        let resp = AppError::from(DomainError::OrderNotFound).error_response();
        let body = to_bytes(resp.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json, serde_json::json!({ "detail": "Order not found" }));
    }

    #[actix_web::test]
    async fn internal_detail_is_not_leaked() {
        let resp = AppError::Internal("password authentication failed".to_string())
            .error_response();
        let body = to_bytes(resp.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["detail"], "Internal server error");
    }

    #[test]
    fn domain_not_found_maps_to_404_with_stable_message() {
        let app_err: AppError = DomainError::CustomerNotFound.into();
        assert!(matches!(&app_err, AppError::NotFound(msg) if msg == "Customer not found"));
    }

    #[test]
    fn email_taken_maps_to_conflict() {
        let app_err: AppError = DomainError::EmailTaken.into();
        assert_eq!(app_err.status_code(), StatusCode::CONFLICT);
        assert_eq!(app_err.to_string(), "Email already registered");
    }

    #[test]
    fn invalid_input_maps_to_422() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert_eq!(app_err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(app_err.to_string(), "bad value");
    }

    #[test]
    fn bad_reference_and_upstream_failure_are_distinguished() {
        let missing: AppError = DomainError::ProductNotFound(42).into();
        let down: AppError = DomainError::ProductServiceUnavailable("timeout".to_string()).into();

        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "Product 42 not found");
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(down.to_string(), "Product service unavailable");
    }
}
