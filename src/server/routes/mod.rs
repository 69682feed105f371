//! HTTP route modules

pub mod health;
pub mod operations;

/// Standard API response structure for simple endpoints
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Error response helpers
pub mod errors {
    use super::ApiResponse;
    use crate::utils::error::ServiceError;
    use actix_web::HttpResponse;

    /// Convert a ServiceError to an HTTP response
    pub fn service_error_to_response(error: ServiceError) -> HttpResponse {
        let (status, message) = match error {
            ServiceError::Validation(msg) => (actix_web::http::StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => (actix_web::http::StatusCode::NOT_FOUND, msg),
            ServiceError::Conflict(msg) => (actix_web::http::StatusCode::CONFLICT, msg),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        HttpResponse::build(status).json(ApiResponse::<()>::error(message))
    }
}
