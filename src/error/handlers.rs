//! Error handlers
//!
//! Maps portal errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::error::types::PortalError;

/// Handle a portal error
pub fn handle_error(err: &PortalError) {
    match err {
        PortalError::BadRequest(_) => warn!("Rejected request: {}", err),
        _ => error!("Login portal error: {}", err),
    }
}

/// Convert error to HTTP status code
pub fn error_to_status_code(err: &PortalError) -> StatusCode {
    match err {
        PortalError::BadRequest(_) => StatusCode::BAD_REQUEST,
        PortalError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PortalError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PortalError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        handle_error(&self);

        let status = error_to_status_code(&self);
        let body = match self {
            PortalError::BadRequest(msg) => msg,
            _ => status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SessionError, StoreError};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            error_to_status_code(&PortalError::BadRequest("missing field".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&StoreError::DuplicateUser("demo".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status_code(&SessionError::Encode("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let response = PortalError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
