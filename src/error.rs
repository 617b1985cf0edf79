use axum::{http::StatusCode, response::Json};
use serde_json::json;

/// Engine-level failures. Validation variants are caller faults; the
/// not-found variants map to 404 over HTTP and the not-found RPC code.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order must contain at least one item")]
    EmptyOrder,
    #[error("each item must have a dish_id")]
    MissingDishId,
    #[error("dish {0} not found")]
    DishNotFound(String),
    #[error("restaurant {0} not found")]
    RestaurantNotFound(String),
    #[error("all items in an order must be from the same restaurant")]
    MixedRestaurants,
    #[error("order {0} not found")]
    OrderNotFound(String),
    #[error("delivery info for order {0} not found")]
    DeliveryNotFound(String),
}

impl OrderError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderError::DishNotFound(_)
                | OrderError::RestaurantNotFound(_)
                | OrderError::OrderNotFound(_)
                | OrderError::DeliveryNotFound(_)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::BadRequest(err.to_string())
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
