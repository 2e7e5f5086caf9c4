use axum::{
    http::{header::InvalidHeaderValue, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use roster_core::RosterError;

use crate::alerts;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    alert: Option<Alert>,
}

#[derive(Debug)]
struct Alert {
    key: String,
    params: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            alert: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Attach a symbolic failure alert carried back to the UI in the
    /// response headers.
    pub fn with_alert(mut self, key: impl Into<String>, params: impl Into<String>) -> Self {
        self.alert = Some(Alert {
            key: key.into(),
            params: params.into(),
        });
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        let mut response = (self.status, body).into_response();
        if let Some(alert) = self.alert {
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&alert.key) {
                headers.insert(&alerts::ALERT_HEADER, value);
            }
            if let Ok(value) = HeaderValue::from_str(&alert.params) {
                headers.insert(&alerts::PARAMS_HEADER, value);
            }
        }
        response
    }
}

// Convert from various error types
impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Validation(msg) => Self::bad_request(msg),
            RosterError::NotFound(msg) => Self::not_found(msg),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<InvalidHeaderValue> for AppError {
    fn from(err: InvalidHeaderValue) -> Self {
        Self::internal(format!("invalid header value: {err}"))
    }
}
