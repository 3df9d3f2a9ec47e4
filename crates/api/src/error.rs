//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::{ErrorKind, OrderError};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request from the client.
    #[error("{0}")]
    BadRequest(String),
    /// Order operation failure.
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Order(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Remote => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal server error");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use common::{OrderId, PartId};
    use domain::OrderStatus;
    use gateway::GatewayError;
    use order_store::StoreError;

    use super::*;

    #[test]
    fn test_status_by_kind() {
        let cases = [
            (OrderError::EmptyPartList, StatusCode::BAD_REQUEST),
            (OrderError::PartsNotFound, StatusCode::NOT_FOUND),
            (
                OrderError::PartNotFound(PartId::new("p1")),
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::OrderNotFound(OrderId::new("o1")),
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::OrderAlreadyPaid(OrderId::new("o1")),
                StatusCode::CONFLICT,
            ),
            (
                OrderError::OrderCancelled(OrderId::new("o1")),
                StatusCode::CONFLICT,
            ),
            (
                OrderError::Timeout {
                    service: "payment",
                    after: Duration::from_secs(2),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                OrderError::Gateway(GatewayError::Unavailable("down".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                OrderError::TotalPriceOverflow,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                OrderError::Store(StoreError::StatusMismatch {
                    order_id: OrderId::new("o1"),
                    expected: OrderStatus::Paid,
                    actual: OrderStatus::PendingPayment,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ApiError::BadRequest("nope".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
