use crate::{
    repository,
    service::{eticket_service::RenderError, mailer_service::DeliveryError},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("event not exist")]
    EventNotExist,

    #[error("booking not exist")]
    BookingNotExist,

    #[error("user not exist")]
    UserNotExist,

    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account deactivated")]
    AccountDeactivated,

    #[error("auth error: missing admin role")]
    MissingRole,

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    ///
    /// This error should be returned only in situations
    /// that should never occur when system is setup correctly.
    ///
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::EventNotExist | Error::BookingNotExist | Error::UserNotExist => {
                StatusCode::NOT_FOUND
            }
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UserAlreadyExists => StatusCode::CONFLICT,
            Error::InvalidCredentials => StatusCode::BAD_REQUEST,
            Error::AccountDeactivated | Error::MissingRole => StatusCode::FORBIDDEN,
            Error::Render(_) | Error::Delivery(_) | Error::Database(_) | Error::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Error::EventNotExist => "Event not found",
            Error::BookingNotExist => "Booking not found",
            Error::UserNotExist => "User not found",
            Error::Validation(message) => message,
            Error::UserAlreadyExists => "User already exists",
            Error::InvalidCredentials => "Invalid credentials",
            Error::AccountDeactivated => {
                "Your account has been deactivated. Please contact support."
            }
            Error::MissingRole => "Admin access required",
            Error::Render(_) | Error::Delivery(_) | Error::Database(_) | Error::Unexpected(_) => {
                "Server error"
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = self.status();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            json!({
                "message": self.message(),
                "error": self.to_string(),
            })
        } else {
            json!({ "message": self.message() })
        };

        (status, Json(body)).into_response()
    }
}
