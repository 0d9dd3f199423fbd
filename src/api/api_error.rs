use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) struct APIError(anyhow::Error);

impl APIError {
    fn status(&self) -> StatusCode {
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return rejection_status(rejection);
        }
        match self.0.downcast_ref::<Error>() {
            Some(Error::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(Error::UnknownClient | Error::Forbidden(_)) => StatusCode::FORBIDDEN,
            Some(Error::MalformedPath | Error::InvalidTxtRequest) => StatusCode::BAD_REQUEST,
            Some(Error::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection {
        JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
        JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Server side failures are logged where they happen; clients only learn the class.
        let message = if status.is_server_error() {
            "internal server error".to_string()
        } else {
            format!("{}", self.0)
        };
        let body = Json(json!({
            "error": message,
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
