use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// A rejection of our own request by the routing service (malformed
    /// request or disabled/invalid credential). Retrying the same pair with
    /// different endpoints cannot fix these, so the transit escalation
    /// stops as soon as one is seen.
    pub fn is_request_rejection(&self) -> bool {
        matches!(self.code, 110 | 111)
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn malformed_request_error() -> Error {
    Error {
        code: 110,
        message: "routing service rejected the request".into(),
    }
}

pub fn access_denied_error() -> Error {
    Error {
        code: 111,
        message: "routing service denied access".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejections_are_terminal() {
        assert!(malformed_request_error().is_request_rejection());
        assert!(access_denied_error().is_request_rejection());
        assert!(!upstream_error().is_request_rejection());
        assert!(!invalid_input_error().is_request_rejection());
    }
}
