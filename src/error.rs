/// Errors surfaced to the browser by the relay
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("No image supplied")]
    MissingInput,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Image exceeds the {} MiB upload limit", .0 / (1024 * 1024))]
    PayloadTooLarge(usize),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

#[cfg(feature = "relay-server")]
mod response {
    use axum::extract::rejection::StringRejection;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::json;

    use super::RelayError;
    use crate::relay::MAX_PAYLOAD_BYTES;

    impl RelayError {
        pub fn status(&self) -> StatusCode {
            match self {
                RelayError::MissingInput | RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                RelayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    /// Body extraction failures (size limit, invalid UTF-8) keep the `{"error": ...}` shape
    impl From<StringRejection> for RelayError {
        fn from(rejection: StringRejection) -> Self {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RelayError::PayloadTooLarge(MAX_PAYLOAD_BYTES)
            } else {
                RelayError::InvalidRequest(rejection.body_text())
            }
        }
    }

    impl IntoResponse for RelayError {
        fn into_response(self) -> Response {
            let status = self.status();
            if status.is_server_error() {
                log::error!("❌ Relay failed: {}", self);
            } else {
                log::warn!("⚠️ Rejected request: {}", self);
            }

            (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
        }
    }
}
