use std::fmt;
use std::fmt::Formatter;
use actix_web::{HttpResponse, ResponseError};
use actix_web::http::StatusCode;
use serde::Serialize;
use crate::manager_power::errors::PowerError;

/// Error raised during startup, aborts the whole service
#[derive(Debug)]
pub struct UnrecoverableError(pub String);

impl fmt::Display for UnrecoverableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "UnrecoverableError: {}", self.0)
    }
}
impl From<&str> for UnrecoverableError {
    fn from(e: &str) -> Self { UnrecoverableError(e.to_string()) }
}
impl From<std::io::Error> for UnrecoverableError {
    fn from(e: std::io::Error) -> Self { UnrecoverableError(e.to_string()) }
}
impl From<serde_json::Error> for UnrecoverableError {
    fn from(e: serde_json::Error) -> Self { UnrecoverableError(e.to_string()) }
}

/// Request level error, rendered as the uniform json error envelope
/// {"error": {"reason": ..., "message": ..., "code": ...}}
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    Upstream(String),
}

impl ApiError {
    fn reason(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Bad request",
            ApiError::NotFound(_)   => "Not found",
            ApiError::Upstream(_)   => "Internal server error",
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Validation(m) | ApiError::NotFound(m) | ApiError::Upstream(m) => m,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason(), self.message())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    reason: &'a str,
    message: &'a str,
    code: u16,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_)   => StatusCode::NOT_FOUND,
            ApiError::Upstream(_)   => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: ErrorBody {
                reason: self.reason(),
                message: self.message(),
                code: self.status_code().as_u16(),
            },
        })
    }
}

impl From<PowerError> for ApiError {
    fn from(e: PowerError) -> Self {
        match e {
            PowerError::Params(m)   => ApiError::Validation(m),
            PowerError::Api(m)      => ApiError::Upstream(m),
            PowerError::Document(m) => ApiError::Upstream(m),
            PowerError::Other(m)    => ApiError::Upstream(m),
        }
    }
}
