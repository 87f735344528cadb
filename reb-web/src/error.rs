use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use reb_stats::StatsError;
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<StatsError> for AppError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::InvalidArgument(msg) => AppError::bad_request(msg),
            StatsError::NoData(msg) => AppError::not_found(msg),
            StatsError::StoreUnavailable(msg) => AppError::unavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_errors_map_to_status_codes() {
        let cases = [
            (StatsError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (StatsError::NoData("x".into()), StatusCode::NOT_FOUND),
            (StatsError::StoreUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }

    #[test]
    fn into_response_keeps_status() {
        let response = AppError::bad_request("missing months").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
