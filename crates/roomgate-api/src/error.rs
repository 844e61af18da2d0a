use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use roomgate_types::api::{ErrorResponse, RegisterFailure};

pub const MSG_MISSING_FIELDS: &str = "用户名、密码、房间号都得填！";
pub const MSG_USER_NOT_FOUND: &str = "用户不存在";
pub const MSG_WRONG_PASSWORD: &str = "密码错误";
pub const MSG_INTERNAL: &str = "服务器内部错误";
pub const MSG_REGISTRATION_FAILED: &str = "注册失败，用户名可能已存在";

/// Failures surfaced to HTTP clients.
///
/// The wrapped causes of `Internal` and `RegistrationFailed` are logged but
/// never sent to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("room name, participant name and password are required")]
    MissingFields,

    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),

    #[error("registration failed: {0:#}")]
    RegistrationFailed(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound | ApiError::WrongPassword => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) | ApiError::RegistrationFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::MissingFields => MSG_MISSING_FIELDS,
            ApiError::UserNotFound => MSG_USER_NOT_FOUND,
            ApiError::WrongPassword => MSG_WRONG_PASSWORD,
            ApiError::Internal(e) => {
                error!("Internal error: {:#}", e);
                MSG_INTERNAL
            }
            ApiError::RegistrationFailed(e) => {
                warn!("Registration failed: {:#}", e);
                let body = RegisterFailure {
                    success: false,
                    error: MSG_REGISTRATION_FAILED.to_string(),
                };
                return (status, Json(body)).into_response();
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
